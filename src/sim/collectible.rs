//! Bonus stars that bob through obstacle gaps

use serde::{Deserialize, Serialize};

use super::physics::{Rect, check_collision};
use super::rng::SimRng;
use crate::consts::{STAR_BOB_AMOUNT, STAR_BOB_STEP, STAR_SIZE};

/// A collectible star
///
/// `y` is the resting line; the drawn position oscillates around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
    /// Bob phase (radians)
    pub phase: f32,
    pub bob_step: f32,
    pub bob_amount: f32,
}

impl Star {
    pub fn new(x: f32, y: f32, speed: f32, phase: f32) -> Self {
        Self {
            x,
            y,
            speed,
            size: STAR_SIZE,
            phase,
            bob_step: STAR_BOB_STEP,
            bob_amount: STAR_BOB_AMOUNT,
        }
    }

    pub fn update(&mut self) {
        self.x += self.speed;
        self.phase += self.bob_step;
    }

    pub fn y_offset(&self) -> f32 {
        self.phase.sin() * self.bob_amount
    }

    /// Vertical position including the bob
    pub fn render_y(&self) -> f32 {
        self.y + self.y_offset()
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            self.x - self.size,
            self.y - self.size,
            self.size * 2.0,
            self.size * 2.0,
        )
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.size < 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectibleManager {
    stars: Vec<Star>,
}

impl CollectibleManager {
    pub fn new() -> Self {
        Self { stars: Vec::new() }
    }

    /// Add a star with a random starting bob phase
    pub fn spawn_star(&mut self, x: f32, y: f32, speed: f32, rng: &mut SimRng) {
        let phase = rng.range_f32(0.0, std::f32::consts::TAU);
        self.stars.push(Star::new(x, y, speed, phase));
    }

    pub fn push(&mut self, star: Star) {
        self.stars.push(star);
    }

    pub fn update(&mut self) {
        for i in (0..self.stars.len()).rev() {
            self.stars[i].update();
            if self.stars[i].is_off_screen() {
                self.stars.remove(i);
            }
        }
    }

    /// Remove every star the plane touches; returns how many were collected
    pub fn check_collisions(&mut self, plane: &Rect) -> u32 {
        let before = self.stars.len();
        self.stars
            .retain(|star| !check_collision(plane, &star.bounding_box()));
        (before - self.stars.len()) as u32
    }

    pub fn reset(&mut self) {
        self.stars.clear();
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bob_is_independent_of_drift() {
        let mut star = Star::new(400.0, 200.0, -3.0, 0.0);
        for _ in 0..10 {
            star.update();
        }
        assert_eq!(star.x, 370.0);
        assert_eq!(star.y, 200.0);
        let expected = (10.0 * STAR_BOB_STEP).sin() * STAR_BOB_AMOUNT;
        assert!((star.render_y() - (200.0 + expected)).abs() < 1e-4);
        assert!(star.y_offset().abs() <= STAR_BOB_AMOUNT);
    }

    #[test]
    fn test_collects_multiple_in_one_frame() {
        let mut manager = CollectibleManager::new();
        manager.push(Star::new(160.0, 310.0, -2.0, 0.0));
        manager.push(Star::new(175.0, 320.0, -2.0, 0.0));
        manager.push(Star::new(600.0, 100.0, -2.0, 0.0));

        let plane = Rect::new(150.0, 300.0, 40.0, 30.0);
        assert_eq!(manager.check_collisions(&plane), 2);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.check_collisions(&plane), 0);
    }

    #[test]
    fn test_off_screen_pruned() {
        let mut manager = CollectibleManager::new();
        manager.push(Star::new(-STAR_SIZE + 1.0, 100.0, -2.0, 0.0));
        manager.push(Star::new(50.0, 100.0, -2.0, 0.0));
        manager.update();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.stars()[0].x, 48.0);
    }

    #[test]
    fn test_spawn_phase_in_range() {
        let mut rng = SimRng::new(9);
        let mut manager = CollectibleManager::new();
        for _ in 0..20 {
            manager.spawn_star(800.0, 300.0, -3.0, &mut rng);
        }
        assert!(
            manager
                .stars()
                .iter()
                .all(|s| (0.0..std::f32::consts::TAU).contains(&s.phase))
        );
    }
}
