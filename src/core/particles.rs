use super::constants::*;
use glam::Vec2;
use rand::prelude::*;
use std::collections::VecDeque;

/// A moving dot on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Integrate one tick, then flip the velocity on any axis that left `bounds`.
    ///
    /// The position is not clamped, so a particle may sit just outside the
    /// canvas for a tick while it turns around.
    #[inline]
    pub fn advance(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }
    }
}

/// Spawn parameters for one particle population.
///
/// - `radius_min`/`radius_span`: radius drawn uniformly from `[min, min + span)`
/// - `speed`: each velocity component drawn uniformly from `[-speed, speed)`
#[derive(Clone, Copy, Debug)]
pub struct Population {
    pub count: usize,
    pub radius_min: f32,
    pub radius_span: f32,
    pub speed: f32,
}

impl Population {
    pub const FOREGROUND: Population = Population {
        count: PARTICLE_COUNT,
        radius_min: PARTICLE_RADIUS_MIN,
        radius_span: PARTICLE_RADIUS_SPAN,
        speed: PARTICLE_SPEED,
    };

    pub const AMBIENT: Population = Population {
        count: AMBIENT_COUNT,
        radius_min: AMBIENT_RADIUS_MIN,
        radius_span: AMBIENT_RADIUS_SPAN,
        speed: AMBIENT_SPEED,
    };

    /// Scatter `count` particles uniformly over `bounds`.
    pub fn spawn(&self, bounds: Vec2, rng: &mut impl Rng) -> Vec<Particle> {
        (0..self.count)
            .map(|_| {
                let pos = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
                let vel = Vec2::new(
                    (rng.gen::<f32>() - 0.5) * 2.0 * self.speed,
                    (rng.gen::<f32>() - 0.5) * 2.0 * self.speed,
                );
                let radius = self.radius_min + rng.gen::<f32>() * self.radius_span;
                Particle::new(pos, vel, radius)
            })
            .collect()
    }
}

/// A fading mark left where the cursor disturbed a particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Bounded FIFO of trail points; the oldest entry is dropped on overflow.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    fade: f32,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(TRAIL_CAPACITY, TRAIL_FADE_PER_TICK)
    }
}

impl TrailBuffer {
    pub fn new(capacity: usize, fade: f32) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
            fade,
        }
    }

    pub fn push(&mut self, point: TrailPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Hand each point to `visit` at its current alpha, then fade it and drop
    /// the ones that are fully transparent.
    pub fn drain_frame(&mut self, mut visit: impl FnMut(&TrailPoint)) {
        let fade = self.fade;
        self.points.retain_mut(|p| {
            visit(p);
            p.alpha -= fade;
            p.alpha > 0.0
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
