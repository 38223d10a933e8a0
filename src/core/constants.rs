// Shared tuning constants for the theme engine. Values are per tick, not per second.

// Palette and cursor smoothing
pub const PALETTE_LERP_RATE: f32 = 0.08; // fraction of the remaining distance covered each tick
pub const CURSOR_SMOOTHING: f32 = 0.12; // first-order low-pass toward the raw pointer

// Background wash
pub const WASH_ALPHA: f32 = 0.12; // translucent fill instead of a hard clear

// Foreground particles
pub const PARTICLE_COUNT: usize = 80;
pub const PARTICLE_RADIUS_MIN: f32 = 1.0;
pub const PARTICLE_RADIUS_SPAN: f32 = 2.0;
pub const PARTICLE_SPEED: f32 = 0.35; // max per-axis velocity magnitude at spawn

// Ambient drifters
pub const AMBIENT_COUNT: usize = 50;
pub const AMBIENT_RADIUS_MIN: f32 = 0.5;
pub const AMBIENT_RADIUS_SPAN: f32 = 1.5;
pub const AMBIENT_SPEED: f32 = 0.1;
pub const AMBIENT_ALPHA: f32 = 0.12;

// Cursor interaction
pub const INTERACTION_RADIUS: f32 = 120.0;
pub const REPULSION_STRENGTH: f32 = 0.3;
pub const GLOW_FALLOFF: f32 = 300.0; // distance at which the cursor glow vanishes
pub const GLOW_RADIUS_GAIN: f32 = 2.0;
pub const PARTICLE_BASE_ALPHA: f32 = 0.8;

// Connection lines
pub const CONNECTION_DISTANCE: f32 = 120.0;

// Cursor trails
pub const TRAIL_CAPACITY: usize = 300;
pub const TRAIL_START_ALPHA: f32 = 0.5;
pub const TRAIL_FADE_PER_TICK: f32 = 0.015;
pub const TRAIL_RADIUS_MIN: f32 = 1.0;
pub const TRAIL_RADIUS_SPAN: f32 = 3.0;

// Seed used when the host does not supply one
pub const DEFAULT_SEED: u64 = 0x5EED_7A11;
