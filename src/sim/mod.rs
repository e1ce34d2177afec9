//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped updates only (one `Game::update` per display frame)
//! - Seeded RNG only, owned by the controller
//! - Stable iteration order (insertion order, reverse-index removal)
//! - No rendering or platform dependencies

pub mod background;
pub mod collectible;
pub mod difficulty;
pub mod game;
pub mod obstacle;
pub mod particle;
pub mod physics;
pub mod plane;
pub mod powerup;
pub mod rng;
pub mod scene;

pub use background::{BackgroundManager, Cloud};
pub use collectible::{CollectibleManager, Star};
pub use difficulty::{Difficulty, DifficultyProfile, ScreenType};
pub use game::{DebugInfo, Game, GameEvent, GamePhase};
pub use obstacle::{Obstacle, ObstacleManager};
pub use particle::{Particle, ParticleKind, ParticleManager};
pub use physics::{Body, Rect};
pub use plane::Plane;
pub use powerup::{PowerUp, PowerUpKind, PowerUpManager};
pub use rng::SimRng;
pub use scene::{Circle, Drawable, Scene};
