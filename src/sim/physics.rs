//! Frame-stepped physics helpers
//!
//! Gravity and jump act on a single vertical velocity; collisions are plain
//! axis-aligned boxes in screen space (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use crate::consts::{MAX_FALL_SPEED, MAX_ROTATION, ROTATION_VELOCITY_RANGE};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anything with a box and a vertical velocity
pub trait Body {
    fn velocity_mut(&mut self) -> &mut f32;
    fn bounding_box(&self) -> Rect;
}

/// Accelerate downward by the profile's gravity, capped at terminal speed
pub fn apply_gravity<B: Body + ?Sized>(body: &mut B, profile: &DifficultyProfile) {
    let v = body.velocity_mut();
    *v = (*v + profile.gravity).min(MAX_FALL_SPEED);
}

/// Set (not add) the vertical velocity to the profile's jump force
pub fn apply_jump<B: Body + ?Sized>(body: &mut B, profile: &DifficultyProfile) {
    *body.velocity_mut() = profile.jump_force;
}

/// Strict AABB overlap; boxes that only share an edge do not collide
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Map vertical velocity onto a nose tilt in `[-30°, 30°]`
pub fn calculate_rotation(velocity: f32) -> f32 {
    let v = velocity.clamp(-ROTATION_VELOCITY_RANGE, ROTATION_VELOCITY_RANGE);
    v / ROTATION_VELOCITY_RANGE * MAX_ROTATION
}
