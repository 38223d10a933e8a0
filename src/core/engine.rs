//! Per-frame simulation and drawing for the ambient background.
//!
//! The engine owns every piece of mutable theme state: the palette store, the
//! cursor, the three particle populations and the RNG used to spawn them. It
//! knows nothing about the DOM; drawing goes through [`Painter`] and the page
//! colors through [`PaletteSink`], so a frame can run headless.
//!
//! Typical usage:
//! - Construct with `ThemeEngine::new(config, store, bounds)`
//! - Call `start()`, then `frame(&mut painter, &mut sink)` once per display
//!   frame until it returns `false`
//! - Feed input through `pointer_moved` and `resize`; call `dispose()` on teardown

use super::color::Rgb;
use super::constants::*;
use super::palette::Palette;
use super::particles::{Particle, Population, TrailBuffer, TrailPoint};
use super::store::{PaletteStore, ThemeStorage};
use glam::Vec2;
use rand::prelude::*;

/// Immediate-mode drawing surface.
pub trait Painter {
    /// Cover the whole surface with a translucent fill.
    fn wash(&mut self, size: Vec2, color: Rgb, alpha: f32);
    fn disc(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);
    fn segment(&mut self, from: Vec2, to: Vec2, color: Rgb, alpha: f32);
}

/// Receives the interpolated palette once per frame.
pub trait PaletteSink {
    fn reflect(&mut self, palette: &Palette);
}

/// Tuning knobs for an engine instance.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub foreground: Population,
    pub ambient: Population,
    pub palette_rate: f32,
    pub cursor_smoothing: f32,
    pub wash_alpha: f32,
    pub ambient_alpha: f32,
    pub interaction_radius: f32,
    pub repulsion: f32,
    pub glow_falloff: f32,
    pub connection_distance: f32,
    pub trail_capacity: usize,
    pub trail_fade: f32,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            foreground: Population::FOREGROUND,
            ambient: Population::AMBIENT,
            palette_rate: PALETTE_LERP_RATE,
            cursor_smoothing: CURSOR_SMOOTHING,
            wash_alpha: WASH_ALPHA,
            ambient_alpha: AMBIENT_ALPHA,
            interaction_radius: INTERACTION_RADIUS,
            repulsion: REPULSION_STRENGTH,
            glow_falloff: GLOW_FALLOFF,
            connection_distance: CONNECTION_DISTANCE,
            trail_capacity: TRAIL_CAPACITY,
            trail_fade: TRAIL_FADE_PER_TICK,
            seed: DEFAULT_SEED,
        }
    }
}

/// Raw pointer position and its low-pass filtered counterpart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub raw: Vec2,
    pub smoothed: Vec2,
}

impl Cursor {
    pub fn at(pos: Vec2) -> Self {
        Self {
            raw: pos,
            smoothed: pos,
        }
    }

    #[inline]
    pub fn smooth(&mut self, factor: f32) {
        self.smoothed += (self.raw - self.smoothed) * factor;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Disposed,
}

pub struct ThemeEngine<S: ThemeStorage> {
    config: EngineConfig,
    store: PaletteStore<S>,
    bounds: Vec2,
    cursor: Cursor,
    particles: Vec<Particle>,
    ambient: Vec<Particle>,
    trails: TrailBuffer,
    rng: StdRng,
    lifecycle: Lifecycle,
}

impl<S: ThemeStorage> ThemeEngine<S> {
    /// Spawn both populations over `bounds` and park the cursor at its center.
    pub fn new(config: EngineConfig, store: PaletteStore<S>, bounds: Vec2) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = config.foreground.spawn(bounds, &mut rng);
        let ambient = config.ambient.spawn(bounds, &mut rng);
        let trails = TrailBuffer::new(config.trail_capacity, config.trail_fade);
        Self {
            config,
            store,
            bounds,
            cursor: Cursor::at(bounds * 0.5),
            particles,
            ambient,
            trails,
            rng,
            lifecycle: Lifecycle::Idle,
        }
    }

    pub fn start(&mut self) {
        match self.lifecycle {
            Lifecycle::Idle => self.lifecycle = Lifecycle::Running,
            Lifecycle::Running => {}
            Lifecycle::Disposed => log::warn!("[engine] start() after dispose() ignored"),
        }
    }

    pub fn dispose(&mut self) {
        self.lifecycle = Lifecycle::Disposed;
        self.trails.clear();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn store(&self) -> &PaletteStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PaletteStore<S> {
        &mut self.store
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.cursor.raw = Vec2::new(x, y);
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access to the foreground population, for scripted scenes.
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn ambient(&self) -> &[Particle] {
        &self.ambient
    }

    pub fn ambient_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.ambient
    }

    pub fn trails(&self) -> &TrailBuffer {
        &self.trails
    }

    /// Push the current palette to `sink` outside the frame cadence.
    pub fn reflect(&self, sink: &mut impl PaletteSink) {
        sink.reflect(self.store.current());
    }

    /// Run one frame. Returns whether further frames should be scheduled.
    pub fn frame(&mut self, painter: &mut impl Painter, sink: &mut impl PaletteSink) -> bool {
        if !self.is_running() {
            return false;
        }
        let cfg = &self.config;

        painter.wash(self.bounds, self.store.current().bg, cfg.wash_alpha);

        self.cursor.smooth(cfg.cursor_smoothing);
        self.store.step(cfg.palette_rate);
        sink.reflect(self.store.current());

        let palette = *self.store.current();

        for a in &mut self.ambient {
            a.advance(self.bounds);
            painter.disc(a.pos, a.radius, palette.ambient, cfg.ambient_alpha);
        }

        let focus = self.cursor.smoothed;
        let radius = cfg.interaction_radius;
        for p in &mut self.particles {
            let away = p.pos - focus;
            let dist = away.length();
            if dist < radius {
                let force = (radius - dist) / radius;
                // A particle sitting exactly on the cursor has no direction to flee in.
                p.vel += away.normalize_or_zero() * cfg.repulsion * force;
                self.trails.push(TrailPoint {
                    pos: focus,
                    radius: TRAIL_RADIUS_MIN + self.rng.gen::<f32>() * TRAIL_RADIUS_SPAN,
                    alpha: TRAIL_START_ALPHA,
                });
            }
            p.advance(self.bounds);
            let glow = (1.0 - dist / cfg.glow_falloff).max(0.0);
            painter.disc(
                p.pos,
                p.radius + glow * GLOW_RADIUS_GAIN,
                palette.trail,
                PARTICLE_BASE_ALPHA - glow / 2.0,
            );
        }

        draw_connections(&self.particles, cfg.connection_distance, palette.trail, &mut *painter);

        self.trails
            .drain_frame(|t| painter.disc(t.pos, t.radius, palette.trail, t.alpha));

        true
    }
}

/// Link every pair of particles closer than `max_dist`, fading with distance.
///
/// Quadratic in the population size.
pub fn draw_connections(
    particles: &[Particle],
    max_dist: f32,
    color: Rgb,
    painter: &mut impl Painter,
) {
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let d = a.pos.distance(b.pos);
            if d < max_dist {
                painter.segment(a.pos, b.pos, color, 1.0 - d / max_dist);
            }
        }
    }
}
