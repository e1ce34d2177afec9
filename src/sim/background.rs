//! Parallax cloud layer
//!
//! A fixed pool of clouds that recycle to the right edge instead of being
//! destroyed. The pool is sorted by speed once, so slow (distant) clouds are
//! drawn first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::consts::CLOUD_COUNT;

/// One puff of a cloud, relative to the cloud's origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudPuff {
    pub offset: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Leftward drift per frame
    pub speed: f32,
    pub alpha: f32,
    pub puffs: Vec<CloudPuff>,
}

impl Cloud {
    pub fn new(canvas_width: f32, canvas_height: f32, rng: &mut SimRng) -> Self {
        let mut cloud = Self {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed: 0.0,
            alpha: 0.0,
            puffs: Vec::new(),
        };
        cloud.randomize(canvas_height, rng);
        cloud.x = rng.range_f32(0.0, canvas_width);
        cloud
    }

    /// Re-roll everything but x, so a recycled cloud looks like a new one
    pub fn randomize(&mut self, canvas_height: f32, rng: &mut SimRng) {
        self.y = rng.range_f32(0.0, canvas_height * 0.8);
        self.size = rng.range_f32(20.0, 70.0);
        self.speed = rng.range_f32(0.1, 0.6);
        self.alpha = rng.range_f32(0.3, 0.8);

        let count = 5 + (self.size / 10.0).floor() as usize;
        self.puffs.clear();
        for _ in 0..count {
            self.puffs.push(CloudPuff {
                offset: Vec2::new(
                    (rng.unit() - 0.5) * self.size * 1.2,
                    (rng.unit() - 0.5) * self.size * 0.5,
                ),
                radius: rng.range_f32(0.0, self.size / 3.0) + self.size / 4.0,
            });
        }
    }

    pub fn update(&mut self, canvas_width: f32, canvas_height: f32, rng: &mut SimRng) {
        self.x -= self.speed;
        if self.x + self.size < 0.0 {
            self.x = canvas_width + self.size;
            self.randomize(canvas_height, rng);
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundManager {
    clouds: Vec<Cloud>,
    canvas_width: f32,
    canvas_height: f32,
}

impl BackgroundManager {
    pub fn new(canvas_width: f32, canvas_height: f32, rng: &mut SimRng) -> Self {
        let mut clouds: Vec<Cloud> = (0..CLOUD_COUNT)
            .map(|_| Cloud::new(canvas_width, canvas_height, rng))
            .collect();
        clouds.sort_by(|a, b| a.speed.total_cmp(&b.speed));
        Self {
            clouds,
            canvas_width,
            canvas_height,
        }
    }

    pub fn update(&mut self, rng: &mut SimRng) {
        for cloud in &mut self.clouds {
            cloud.update(self.canvas_width, self.canvas_height, rng);
        }
    }

    /// Clouds in draw order (back to front)
    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

    #[test]
    fn test_pool_size_is_fixed() {
        let mut rng = SimRng::new(10);
        let mut bg = BackgroundManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);
        assert_eq!(bg.len(), CLOUD_COUNT);
        // Slowest cloud (0.1/frame) needs ~9000 frames to cross; every cloud recycles
        for _ in 0..10_000 {
            bg.update(&mut rng);
            assert_eq!(bg.len(), CLOUD_COUNT);
        }
    }

    #[test]
    fn test_sorted_by_speed_at_init() {
        let mut rng = SimRng::new(77);
        let bg = BackgroundManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);
        assert!(bg.clouds().windows(2).all(|w| w[0].speed <= w[1].speed));
    }

    #[test]
    fn test_recycle_rerolls_attributes() {
        let mut rng = SimRng::new(5);
        let mut cloud = Cloud::new(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);
        cloud.x = -cloud.size + 0.05;
        cloud.update(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);

        assert!(cloud.x > CANVAS_WIDTH);
        assert_eq!(cloud.puffs.len(), 5 + (cloud.size / 10.0).floor() as usize);
        assert!((20.0..70.0).contains(&cloud.size));
        assert!((0.1..0.6).contains(&cloud.speed));
        assert!((0.3..0.8).contains(&cloud.alpha));
        assert!(cloud.y < CANVAS_HEIGHT * 0.8);
    }
}
