//! Visual particles
//!
//! One data-driven particle type; the kind only selects spawn parameters
//! and the drawn shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::consts::{
    COLLISION_PARTICLES, JUMP_PARTICLES, PARTICLE_FRICTION, PARTICLE_GRAVITY, PARTICLE_JITTER,
    PARTICLE_LIFE_STEP, SCORE_PARTICLES, TRAIL_PARTICLES,
};

/// Particle flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ParticleKind {
    Jump,
    Score,
    Collision,
    Trail,
    #[default]
    Default,
}

/// Spawn parameters for one particle kind
#[derive(Debug, Clone, Copy)]
pub struct ParticleSpec {
    pub color: &'static str,
    pub life: f32,
    pub vx: (f32, f32),
    pub vy: (f32, f32),
    pub size: (f32, f32),
    pub gravity: f32,
}

impl ParticleKind {
    pub fn spec(&self) -> ParticleSpec {
        const BASE: ParticleSpec = ParticleSpec {
            color: "#FFFFFF",
            life: 1.0,
            vx: (-2.0, 2.0),
            vy: (-3.0, -1.0),
            size: (2.0, 6.0),
            gravity: PARTICLE_GRAVITY,
        };
        match self {
            ParticleKind::Jump => ParticleSpec {
                color: "#87CEEB",
                life: 0.8,
                ..BASE
            },
            ParticleKind::Score => ParticleSpec {
                color: "#FFD700",
                life: 1.2,
                size: (3.0, 8.0),
                ..BASE
            },
            ParticleKind::Collision => ParticleSpec {
                color: "#FF6B6B",
                vx: (-4.0, 4.0),
                vy: (-5.0, -2.0),
                ..BASE
            },
            ParticleKind::Trail => ParticleSpec {
                life: 0.3,
                size: (1.0, 3.0),
                gravity: 0.0,
                ..BASE
            },
            ParticleKind::Default => BASE,
        }
    }

    pub fn color(&self) -> &'static str {
        self.spec().color
    }
}

/// A single particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub friction: f32,
    pub rotation: f32,
    pub spin: f32,
    pub size: f32,
    /// Remaining life in seconds at the nominal frame rate
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, kind: ParticleKind, rng: &mut SimRng) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            pos,
            vel: Vec2::new(
                rng.range_f32(spec.vx.0, spec.vx.1),
                rng.range_f32(spec.vy.0, spec.vy.1),
            ),
            gravity: spec.gravity,
            friction: PARTICLE_FRICTION,
            rotation: 0.0,
            spin: rng.range_f32(-0.2, 0.2),
            size: rng.range_f32(spec.size.0, spec.size.1),
            life: spec.life,
            max_life: spec.life,
        }
    }

    /// Advance one frame; returns false once the particle has expired
    pub fn update(&mut self) -> bool {
        self.vel.x *= self.friction;
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.rotation += self.spin;
        self.life -= PARTICLE_LIFE_STEP;
        self.life > 0.0
    }

    /// Linear fade from 1 to 0 over the particle's life
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn color(&self) -> &'static str {
        self.kind.color()
    }
}

/// Owns all live particles
#[derive(Debug, Clone)]
pub struct ParticleManager {
    particles: Vec<Particle>,
    /// Live particle cap (0 disables particles)
    max_particles: usize,
}

impl Default for ParticleManager {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl ParticleManager {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    pub fn set_max_particles(&mut self, max_particles: usize) {
        self.max_particles = max_particles;
        self.enforce_cap();
    }

    /// Spawn `count` particles jittered around `(x, y)`
    pub fn spawn(&mut self, x: f32, y: f32, count: usize, kind: ParticleKind, rng: &mut SimRng) {
        for _ in 0..count {
            let pos = Vec2::new(
                x + rng.range_f32(-PARTICLE_JITTER, PARTICLE_JITTER),
                y + rng.range_f32(-PARTICLE_JITTER, PARTICLE_JITTER),
            );
            self.particles.push(Particle::new(pos, kind, rng));
        }
        self.enforce_cap();
    }

    pub fn spawn_jump(&mut self, x: f32, y: f32, rng: &mut SimRng) {
        self.spawn(x, y, JUMP_PARTICLES, ParticleKind::Jump, rng);
    }

    pub fn spawn_score(&mut self, x: f32, y: f32, rng: &mut SimRng) {
        self.spawn(x, y, SCORE_PARTICLES, ParticleKind::Score, rng);
    }

    pub fn spawn_collision(&mut self, x: f32, y: f32, rng: &mut SimRng) {
        self.spawn(x, y, COLLISION_PARTICLES, ParticleKind::Collision, rng);
    }

    pub fn spawn_trail(&mut self, x: f32, y: f32, rng: &mut SimRng) {
        self.spawn(x, y, TRAIL_PARTICLES, ParticleKind::Trail, rng);
    }

    /// Drop the oldest particles beyond the cap
    fn enforce_cap(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    pub fn update(&mut self) {
        for i in (0..self.particles.len()).rev() {
            if !self.particles[i].update() {
                self.particles.remove(i);
            }
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_counts() {
        let mut rng = SimRng::new(4);
        let mut manager = ParticleManager::default();
        manager.spawn_jump(100.0, 100.0, &mut rng);
        assert_eq!(manager.len(), 5);
        manager.spawn_score(100.0, 100.0, &mut rng);
        assert_eq!(manager.len(), 13);
        manager.spawn_collision(100.0, 100.0, &mut rng);
        assert_eq!(manager.len(), 28);
        manager.spawn_trail(100.0, 100.0, &mut rng);
        assert_eq!(manager.len(), 29);

        for p in manager.particles() {
            assert!((p.pos.x - 100.0).abs() <= PARTICLE_JITTER);
            assert!((p.pos.y - 100.0).abs() <= PARTICLE_JITTER);
        }
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut rng = SimRng::new(8);
        let mut particle = Particle::new(Vec2::ZERO, ParticleKind::Trail, &mut rng);
        let mut alive_frames = 0;
        let mut last_life = particle.life;

        while particle.update() {
            assert!(particle.life <= last_life);
            last_life = particle.life;
            alive_frames += 1;
            assert!(alive_frames < 100);
        }
        // 0.3 s at 60 fps
        assert!((17..=18).contains(&alive_frames));
        assert!(particle.life <= 0.0);
    }

    #[test]
    fn test_manager_removes_expired() {
        let mut rng = SimRng::new(8);
        let mut manager = ParticleManager::default();
        manager.spawn_trail(0.0, 0.0, &mut rng);
        manager.spawn_score(0.0, 0.0, &mut rng);

        for _ in 0..30 {
            manager.update();
        }
        assert_eq!(manager.len(), 8, "trail gone, score still alive");
        for _ in 0..60 {
            manager.update();
        }
        assert!(manager.is_empty());
    }

    #[test]
    fn test_trail_has_no_gravity_and_fades() {
        let mut rng = SimRng::new(1);
        let mut trail = Particle::new(Vec2::ZERO, ParticleKind::Trail, &mut rng);
        let vy = trail.vel.y;
        trail.update();
        assert_eq!(trail.vel.y, vy);
        assert!(trail.alpha() < 1.0 && trail.alpha() > 0.0);

        let mut jump = Particle::new(Vec2::ZERO, ParticleKind::Jump, &mut rng);
        let vy = jump.vel.y;
        jump.update();
        assert!((jump.vel.y - (vy + PARTICLE_GRAVITY)).abs() < 1e-6);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut rng = SimRng::new(1);
        let mut manager = ParticleManager::new(10);
        manager.spawn_jump(0.0, 0.0, &mut rng);
        manager.spawn_collision(500.0, 500.0, &mut rng);
        assert_eq!(manager.len(), 10);
        assert!(manager.particles().iter().all(|p| p.kind == ParticleKind::Collision));

        manager.set_max_particles(0);
        assert!(manager.is_empty());
    }
}
