//! Paper Plane - A side-scrolling glider arcade game
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (physics, entities, game state)
//! - `audio`: Fire-and-forget sound events (Web Audio in the browser)
//! - `platform`: Input mapping, resize debouncing, viewport classification
//! - `persistence`: Best-score storage behind a narrow trait
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::BestScores;
pub use settings::{AudioMix, EffectsLevel, Settings};

/// Game configuration constants
///
/// All speeds and accelerations are expressed per frame at 60 Hz.
pub mod consts {
    /// Frames per second the simulation is tuned for
    pub const FRAME_RATE: f32 = 60.0;
    /// Life drained from a particle every frame
    pub const PARTICLE_LIFE_STEP: f32 = 1.0 / FRAME_RATE;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Plane defaults
    pub const PLANE_WIDTH: f32 = 40.0;
    pub const PLANE_HEIGHT: f32 = 30.0;
    pub const PLANE_START_X: f32 = 150.0;

    /// Physics limits
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Velocity magnitude mapped onto the full tilt range
    pub const ROTATION_VELOCITY_RANGE: f32 = 10.0;
    /// Maximum nose tilt (30 degrees)
    pub const MAX_ROTATION: f32 = std::f32::consts::PI / 6.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 50.0;
    pub const PIPE_CAP_HEIGHT: f32 = 25.0;
    pub const PIPE_CAP_OVERHANG: f32 = 5.0;
    pub const PIPE_STRIPE_INSET: f32 = 10.0;
    pub const PIPE_STRIPE_SPACING: f32 = 15.0;

    /// Star collectible defaults
    pub const STAR_SIZE: f32 = 12.0;
    pub const STAR_BOB_STEP: f32 = 0.05;
    pub const STAR_BOB_AMOUNT: f32 = 3.0;
    /// Chance a freshly spawned obstacle carries a star in its gap
    pub const STAR_SPAWN_CHANCE: f64 = 0.5;
    /// Points awarded per collected star
    pub const STAR_SCORE: u32 = 1;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_MIN_INTERVAL: u32 = 480;
    pub const POWERUP_MAX_INTERVAL: u32 = 720;
    /// Vertical spawn band as fractions of canvas height
    pub const POWERUP_BAND_TOP: f32 = 0.2;
    pub const POWERUP_BAND_BOTTOM: f32 = 0.8;

    /// Particle defaults
    pub const PARTICLE_JITTER: f32 = 10.0;
    pub const PARTICLE_FRICTION: f32 = 0.98;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const JUMP_PARTICLES: usize = 5;
    pub const SCORE_PARTICLES: usize = 8;
    pub const COLLISION_PARTICLES: usize = 15;
    pub const TRAIL_PARTICLES: usize = 1;
    /// Per-frame chance of emitting a trail particle while playing
    pub const TRAIL_CHANCE: f64 = 0.3;

    /// Background cloud pool size
    pub const CLOUD_COUNT: usize = 10;

    /// Viewports narrower than this are treated as mobile
    pub const MOBILE_BREAKPOINT: f32 = 600.0;
    /// Trailing debounce applied to viewport resizes (ms)
    pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;
}
