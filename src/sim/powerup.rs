//! Power-up pickups
//!
//! A power-up is a record tagged with its kind; size, look and effect all
//! dispatch on the tag.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::physics::{Rect, check_collision};
use super::rng::SimRng;
use crate::consts::{
    POWERUP_BAND_BOTTOM, POWERUP_BAND_TOP, POWERUP_MAX_INTERVAL, POWERUP_MIN_INTERVAL,
    POWERUP_SIZE,
};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one obstacle collision
    Shield,
}

impl PowerUpKind {
    /// Box size (width, height)
    pub fn size(&self) -> (f32, f32) {
        match self {
            PowerUpKind::Shield => (POWERUP_SIZE, POWERUP_SIZE),
        }
    }

    /// Glyph drawn on the pickup
    pub fn glyph(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "S",
        }
    }
}

/// A pickup drifting left with the obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32, speed: f32) -> Self {
        Self { kind, x, y, speed }
    }

    pub fn update(&mut self) {
        self.x += self.speed;
    }

    pub fn bounding_box(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.x, self.y, w, h)
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.kind.size().0 < 0.0
    }
}

/// Spawns power-ups on a randomized timer
#[derive(Debug, Clone)]
pub struct PowerUpManager {
    power_ups: Vec<PowerUp>,
    canvas_width: f32,
    canvas_height: f32,
    /// Frames until the next spawn
    spawn_timer: u32,
}

impl PowerUpManager {
    pub fn new(canvas_width: f32, canvas_height: f32, rng: &mut SimRng) -> Self {
        Self {
            power_ups: Vec::new(),
            canvas_width,
            canvas_height,
            spawn_timer: Self::roll_interval(rng),
        }
    }

    fn roll_interval(rng: &mut SimRng) -> u32 {
        rng.range_u32(POWERUP_MIN_INTERVAL, POWERUP_MAX_INTERVAL)
    }

    pub fn update(&mut self, profile: &DifficultyProfile, rng: &mut SimRng) {
        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        if self.spawn_timer == 0 {
            self.spawn(profile, rng);
            self.spawn_timer = Self::roll_interval(rng);
        }

        for i in (0..self.power_ups.len()).rev() {
            self.power_ups[i].update();
            if self.power_ups[i].is_off_screen() {
                self.power_ups.remove(i);
            }
        }
    }

    /// Spawn a shield at the right edge, within the middle band of the screen
    fn spawn(&mut self, profile: &DifficultyProfile, rng: &mut SimRng) {
        let top = (self.canvas_height * POWERUP_BAND_TOP).ceil() as u32;
        let bottom = (self.canvas_height * POWERUP_BAND_BOTTOM).floor() as u32;
        let y = rng.range_u32(top, bottom) as f32;
        log::debug!("Shield power-up spawned at y={}", y);
        self.power_ups.push(PowerUp::new(
            PowerUpKind::Shield,
            self.canvas_width,
            y,
            profile.obstacle_speed,
        ));
    }

    /// Remove and return the first power-up the plane touches
    pub fn check_collision(&mut self, plane: &Rect) -> Option<PowerUp> {
        let index = self
            .power_ups
            .iter()
            .rposition(|p| check_collision(plane, &p.bounding_box()))?;
        Some(self.power_ups.remove(index))
    }

    pub fn reset(&mut self, rng: &mut SimRng) {
        self.power_ups.clear();
        self.spawn_timer = Self::roll_interval(rng);
    }

    pub fn push(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn len(&self) -> usize {
        self.power_ups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power_ups.is_empty()
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

    #[test]
    fn test_spawn_interval_and_band() {
        let profile = DifficultyProfile::NORMAL;
        let mut rng = SimRng::new(21);
        let mut manager = PowerUpManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);

        for _ in 0..20 {
            let wait = manager.spawn_timer();
            assert!((POWERUP_MIN_INTERVAL..=POWERUP_MAX_INTERVAL).contains(&wait));
            let count = manager.len();
            for _ in 0..wait {
                manager.update(&profile, &mut rng);
            }
            assert_eq!(manager.len(), count + 1);

            let newest = manager.power_ups().last().unwrap();
            assert!(newest.y >= CANVAS_HEIGHT * POWERUP_BAND_TOP);
            assert!(newest.y <= CANVAS_HEIGHT * POWERUP_BAND_BOTTOM);
            assert_eq!(newest.speed, profile.obstacle_speed);

            manager.reset(&mut rng);
        }
    }

    #[test]
    fn test_collision_returns_collected_instance() {
        let mut rng = SimRng::new(2);
        let mut manager = PowerUpManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);
        manager.push(PowerUp::new(PowerUpKind::Shield, 160.0, 300.0, -3.0));

        let far = Rect::new(500.0, 0.0, 40.0, 30.0);
        assert!(manager.check_collision(&far).is_none());

        let plane = Rect::new(150.0, 290.0, 40.0, 30.0);
        let collected = manager.check_collision(&plane).unwrap();
        assert!(matches!(collected.kind, PowerUpKind::Shield));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_off_screen_pruned() {
        let profile = DifficultyProfile::EASY;
        let mut rng = SimRng::new(2);
        let mut manager = PowerUpManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &mut rng);
        manager.push(PowerUp::new(PowerUpKind::Shield, -29.0, 300.0, -2.0));
        manager.update(&profile, &mut rng);
        assert!(manager.is_empty());
    }
}
