//! The player's paper plane

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::physics::{self, Body, Rect};
use crate::consts::{PLANE_HEIGHT, PLANE_WIDTH};

/// The player-controlled glider
///
/// Only the vertical axis is simulated; x stays where `reset` put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    /// Nose tilt in radians, derived from velocity
    pub rotation: f32,
    pub shielded: bool,
}

impl Plane {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLANE_WIDTH,
            height: PLANE_HEIGHT,
            velocity: 0.0,
            rotation: 0.0,
            shielded: false,
        }
    }

    /// Advance one frame: gravity, integrate, re-derive tilt
    pub fn update(&mut self, profile: &DifficultyProfile) {
        physics::apply_gravity(self, profile);
        self.y += self.velocity;
        self.rotation = physics::calculate_rotation(self.velocity);
    }

    pub fn jump(&mut self, profile: &DifficultyProfile) {
        physics::apply_jump(self, profile);
    }

    /// True once the plane leaves the vertical playfield
    pub fn check_bounds(&self, _width: f32, height: f32) -> bool {
        self.y < 0.0 || self.y + self.height > height
    }

    pub fn activate_shield(&mut self) {
        self.shielded = true;
    }

    pub fn deactivate_shield(&mut self) {
        self.shielded = false;
    }

    /// Put the plane back at a start position for a new run
    pub fn reset(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.velocity = 0.0;
        self.rotation = 0.0;
        self.shielded = false;
    }
}

impl Body for Plane {
    fn velocity_mut(&mut self) -> &mut f32 {
        &mut self.velocity
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

    #[test]
    fn test_falls_until_out_of_bounds() {
        let profile = DifficultyProfile::EASY;
        let mut plane = Plane::new(150.0, CANVAS_HEIGHT / 2.0);
        let mut last_y = plane.y;
        let mut frames = 0;

        while !plane.check_bounds(CANVAS_WIDTH, CANVAS_HEIGHT) {
            plane.update(&profile);
            assert!(plane.y > last_y, "plane should keep falling");
            last_y = plane.y;
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(plane.y + plane.height > CANVAS_HEIGHT);
    }

    #[test]
    fn test_jump_tilts_nose_up() {
        let profile = DifficultyProfile::NORMAL;
        let mut plane = Plane::new(150.0, 300.0);
        plane.jump(&profile);
        plane.update(&profile);
        assert_eq!(plane.velocity, profile.jump_force + profile.gravity);
        assert!(plane.rotation < 0.0);
        assert!(plane.y < 300.0);
    }

    #[test]
    fn test_bounds_ignore_horizontal_position() {
        let mut plane = Plane::new(-500.0, 100.0);
        assert!(!plane.check_bounds(CANVAS_WIDTH, CANVAS_HEIGHT));
        plane.x = 5000.0;
        assert!(!plane.check_bounds(CANVAS_WIDTH, CANVAS_HEIGHT));
        plane.y = -1.0;
        assert!(plane.check_bounds(CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn test_reset_clears_motion_and_shield() {
        let mut plane = Plane::new(150.0, 300.0);
        plane.velocity = 6.0;
        plane.rotation = 0.3;
        plane.activate_shield();
        plane.reset(150.0, 300.0);
        assert_eq!(plane.velocity, 0.0);
        assert_eq!(plane.rotation, 0.0);
        assert!(!plane.shielded);
    }
}
