//! Gated pipe obstacles and their spawner

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::physics::{Rect, check_collision};
use super::rng::SimRng;
use crate::consts::{OBSTACLE_MIN_HEIGHT, OBSTACLE_WIDTH};

/// A top/bottom pipe pair with a gap between them
///
/// Speed and gap are captured from the profile at spawn time, so changing
/// difficulty never alters obstacles that are already on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    pub speed: f32,
    pub gap: f32,
    pub min_height: f32,
    pub top_height: f32,
    pub bottom_y: f32,
    pub bottom_height: f32,
    /// Set once the plane has cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    /// Create an obstacle with a random gap position that always fits on screen
    pub fn spawn(x: f32, canvas_height: f32, profile: &DifficultyProfile, rng: &mut SimRng) -> Self {
        let gap = profile.obstacle_gap;
        let min_height = OBSTACLE_MIN_HEIGHT;
        // A canvas too short for the gap collapses the range instead of failing
        let max_height = (canvas_height - gap - min_height).max(min_height);
        let top_height = rng.range_u32(min_height as u32, max_height.floor() as u32) as f32;
        Self::with_top_height(x, canvas_height, profile, top_height)
    }

    /// Create an obstacle with an explicit top pipe height
    pub fn with_top_height(
        x: f32,
        canvas_height: f32,
        profile: &DifficultyProfile,
        top_height: f32,
    ) -> Self {
        let gap = profile.obstacle_gap;
        let bottom_y = top_height + gap;
        Self {
            x,
            width: OBSTACLE_WIDTH,
            speed: profile.obstacle_speed,
            gap,
            min_height: OBSTACLE_MIN_HEIGHT,
            top_height,
            bottom_y,
            bottom_height: (canvas_height - bottom_y).max(0.0),
            passed: false,
        }
    }

    pub fn update(&mut self) {
        self.x += self.speed;
    }

    pub fn top_pipe(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_pipe(&self) -> Rect {
        Rect::new(self.x, self.bottom_y, self.width, self.bottom_height)
    }

    /// Centre of the gap between the pipes
    pub fn gap_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.top_height + self.gap / 2.0)
    }

    pub fn check_collision(&self, plane: &Rect) -> bool {
        check_collision(plane, &self.top_pipe()) || check_collision(plane, &self.bottom_pipe())
    }

    /// Award the pass exactly once, the first frame `plane_x` clears the right edge
    pub fn check_score(&mut self, plane_x: f32) -> bool {
        if !self.passed && plane_x > self.x + self.width {
            self.passed = true;
            return true;
        }
        false
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Geometry of an obstacle spawned this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedObstacle {
    pub gap_center: Vec2,
    pub speed: f32,
}

/// Owns live obstacles and the frames-until-spawn countdown
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    obstacles: Vec<Obstacle>,
    canvas_width: f32,
    canvas_height: f32,
    spawn_interval: u32,
    spawn_timer: u32,
}

impl ObstacleManager {
    pub fn new(canvas_width: f32, canvas_height: f32, profile: &DifficultyProfile) -> Self {
        let spawn_interval = profile.spawn_interval.max(1);
        Self {
            obstacles: Vec::new(),
            canvas_width,
            canvas_height,
            spawn_interval,
            spawn_timer: spawn_interval,
        }
    }

    /// Count down, spawn on zero, then move and prune
    pub fn update(&mut self, profile: &DifficultyProfile, rng: &mut SimRng) -> Option<SpawnedObstacle> {
        let mut spawned = None;
        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        if self.spawn_timer == 0 {
            let obstacle = Obstacle::spawn(self.canvas_width, self.canvas_height, profile, rng);
            log::debug!(
                "Obstacle spawned: top={} gap={} speed={}",
                obstacle.top_height,
                obstacle.gap,
                obstacle.speed
            );
            spawned = Some(SpawnedObstacle {
                gap_center: obstacle.gap_center(),
                speed: obstacle.speed,
            });
            self.obstacles.push(obstacle);
            self.spawn_timer = self.spawn_interval;
        }

        for i in (0..self.obstacles.len()).rev() {
            self.obstacles[i].update();
            if self.obstacles[i].is_off_screen() {
                self.obstacles.remove(i);
            }
        }

        spawned
    }

    /// Index of the first obstacle the plane overlaps
    pub fn check_collisions(&self, plane: &Rect) -> Option<usize> {
        self.obstacles.iter().position(|o| o.check_collision(plane))
    }

    /// Number of obstacles newly passed this frame
    pub fn check_score(&mut self, plane_x: f32) -> u32 {
        let mut passed = 0;
        for obstacle in &mut self.obstacles {
            if obstacle.check_score(plane_x) {
                passed += 1;
            }
        }
        passed
    }

    /// Remove one obstacle (shield break)
    pub fn destroy_obstacle(&mut self, index: usize) -> Option<Obstacle> {
        (index < self.obstacles.len()).then(|| self.obstacles.remove(index))
    }

    /// Clear all obstacles and re-arm the timer from the profile
    pub fn reset(&mut self, profile: &DifficultyProfile) {
        self.obstacles.clear();
        self.spawn_interval = profile.spawn_interval.max(1);
        self.spawn_timer = self.spawn_interval;
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Frames until the next spawn
    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, PLANE_HEIGHT, PLANE_WIDTH};
    use proptest::prelude::*;

    #[test]
    fn test_first_spawn_on_interval_frame() {
        let profile = DifficultyProfile::EASY;
        let mut rng = SimRng::new(3);
        let mut manager = ObstacleManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &profile);

        for _ in 0..179 {
            assert!(manager.update(&profile, &mut rng).is_none());
        }
        assert!(manager.is_empty());
        assert!(manager.update(&profile, &mut rng).is_some());
        assert_eq!(manager.len(), 1);
        // Spawned at the right edge, then moved once
        assert_eq!(manager.obstacles()[0].x, CANVAS_WIDTH + profile.obstacle_speed);
    }

    #[test]
    fn test_prunes_off_screen() {
        let profile = DifficultyProfile::HARD;
        let mut rng = SimRng::new(3);
        let mut manager = ObstacleManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &profile);
        manager.push(Obstacle::with_top_height(-OBSTACLE_WIDTH + 1.0, CANVAS_HEIGHT, &profile, 100.0));
        manager.push(Obstacle::with_top_height(400.0, CANVAS_HEIGHT, &profile, 100.0));
        manager.update(&profile, &mut rng);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.obstacles()[0].x, 400.0 + profile.obstacle_speed);
    }

    #[test]
    fn test_collision_with_either_pipe() {
        let profile = DifficultyProfile::NORMAL;
        let obstacle = Obstacle::with_top_height(100.0, CANVAS_HEIGHT, &profile, 200.0);
        let in_gap = Rect::new(110.0, 250.0, PLANE_WIDTH, PLANE_HEIGHT);
        let hits_top = Rect::new(110.0, 180.0, PLANE_WIDTH, PLANE_HEIGHT);
        let hits_bottom = Rect::new(110.0, 340.0, PLANE_WIDTH, PLANE_HEIGHT);
        let touching_top = Rect::new(110.0, 200.0, PLANE_WIDTH, PLANE_HEIGHT);

        assert!(!obstacle.check_collision(&in_gap));
        assert!(obstacle.check_collision(&hits_top));
        assert!(obstacle.check_collision(&hits_bottom));
        assert!(!obstacle.check_collision(&touching_top));
    }

    #[test]
    fn test_score_awarded_once() {
        let profile = DifficultyProfile::NORMAL;
        let mut manager = ObstacleManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &profile);
        manager.push(Obstacle::with_top_height(50.0, CANVAS_HEIGHT, &profile, 200.0));

        assert_eq!(manager.check_score(110.0), 0); // exactly at the right edge
        assert_eq!(manager.check_score(150.0), 1);
        for _ in 0..10 {
            assert_eq!(manager.check_score(150.0), 0);
        }
        assert!(manager.obstacles()[0].passed);
    }

    #[test]
    fn test_destroy_removes_only_that_obstacle() {
        let profile = DifficultyProfile::NORMAL;
        let mut manager = ObstacleManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &profile);
        manager.push(Obstacle::with_top_height(100.0, CANVAS_HEIGHT, &profile, 100.0));
        manager.push(Obstacle::with_top_height(300.0, CANVAS_HEIGHT, &profile, 150.0));
        manager.push(Obstacle::with_top_height(500.0, CANVAS_HEIGHT, &profile, 200.0));

        let removed = manager.destroy_obstacle(1).unwrap();
        assert_eq!(removed.x, 300.0);
        assert_eq!(manager.len(), 2);
        assert!(manager.destroy_obstacle(5).is_none());
    }

    #[test]
    fn test_profile_change_is_not_retroactive() {
        let normal = DifficultyProfile::NORMAL;
        let hard = DifficultyProfile::HARD;
        let mut rng = SimRng::new(11);
        let mut manager = ObstacleManager::new(CANVAS_WIDTH, CANVAS_HEIGHT, &normal);
        for _ in 0..normal.spawn_interval {
            manager.update(&normal, &mut rng);
        }
        assert_eq!(manager.len(), 1);
        let survivor = manager.obstacles()[0].clone();

        manager.reset(&hard);
        manager.push(survivor);
        for _ in 0..hard.spawn_interval {
            manager.update(&hard, &mut rng);
        }
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.obstacles()[0].speed, normal.obstacle_speed);
        assert_eq!(manager.obstacles()[0].gap, normal.obstacle_gap);
        assert_eq!(manager.obstacles()[1].speed, hard.obstacle_speed);
        assert_eq!(manager.obstacles()[1].gap, hard.obstacle_gap);
    }

    #[test]
    fn test_tiny_canvas_still_spawns() {
        let profile = DifficultyProfile::EASY;
        let mut rng = SimRng::new(5);
        let obstacle = Obstacle::spawn(CANVAS_WIDTH, 120.0, &profile, &mut rng);
        assert_eq!(obstacle.top_height, OBSTACLE_MIN_HEIGHT);
        assert_eq!(obstacle.bottom_height, 0.0);
    }

    proptest! {
        #[test]
        fn top_height_within_bounds(seed in any::<u64>(), height in 400.0f32..1200.0, which in 0usize..3) {
            let profile = [DifficultyProfile::EASY, DifficultyProfile::NORMAL, DifficultyProfile::HARD][which];
            let mut rng = SimRng::new(seed);
            let o = Obstacle::spawn(CANVAS_WIDTH, height, &profile, &mut rng);
            prop_assert!(o.top_height >= o.min_height);
            prop_assert!(o.top_height <= height - o.gap - o.min_height);
            prop_assert!(o.bottom_height >= o.min_height - 1e-3);
        }
    }
}
