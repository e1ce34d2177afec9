//! Game controller
//!
//! Owns every entity manager, the active difficulty profile and the single
//! RNG. The host calls `handle_input` on player intents, `update` once per
//! frame and `scene` once per frame; side effects (sound, HUD, persistence
//! notices) come back as queued `GameEvent`s.

use serde::{Deserialize, Serialize};

use super::background::BackgroundManager;
use super::collectible::CollectibleManager;
use super::difficulty::{Difficulty, DifficultyProfile, ScreenType};
use super::obstacle::ObstacleManager;
use super::particle::ParticleManager;
use super::physics::Body;
use super::plane::Plane;
use super::powerup::{PowerUp, PowerUpKind, PowerUpManager};
use super::rng::SimRng;
use super::scene::{Drawable, Scene};
use crate::audio::SoundEvent;
use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, PLANE_START_X, STAR_SCORE, STAR_SPAWN_CHANCE, TRAIL_CHANCE,
};
use crate::persistence::{ScoreStore, best_score_key};
use crate::platform::InputAction;
use crate::settings::Settings;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Start screen, waiting for the first input
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended, final score shown
    GameOver,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEvent),
    ScoreChanged(u32),
    PhaseChanged(GamePhase),
    /// A run beat the stored best for its difficulty
    NewBest { difficulty: Difficulty, score: u32 },
}

/// Snapshot for the debug overlay
#[derive(Debug, Clone, PartialEq)]
pub struct DebugInfo {
    pub difficulty: &'static str,
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub rotation: f32,
    pub obstacles: usize,
    pub score: u32,
}

impl DebugInfo {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Difficulty: {}", self.difficulty),
            format!("Plane: ({:.0}, {:.0})", self.x, self.y),
            format!("Velocity: {:.2}", self.velocity),
            format!("Rotation: {:.2}", self.rotation),
            format!("Obstacles: {}", self.obstacles),
            format!("Score: {}", self.score),
        ]
    }
}

pub struct Game {
    phase: GamePhase,
    score: u32,
    frame: u64,

    /// Difficulty picked on the start screen, applied at the next run start
    selected: Difficulty,
    screen: ScreenType,
    /// Profile in force for the current (or last) run
    profile: DifficultyProfile,

    canvas_width: f32,
    canvas_height: f32,

    rng: SimRng,
    plane: Plane,
    obstacles: ObstacleManager,
    collectibles: CollectibleManager,
    power_ups: PowerUpManager,
    particles: ParticleManager,
    background: BackgroundManager,

    trails: bool,
    clouds: bool,

    events: Vec<GameEvent>,
    store: Box<dyn ScoreStore>,
}

impl Game {
    pub fn new(seed: u64, store: Box<dyn ScoreStore>) -> Self {
        Self::with_canvas(CANVAS_WIDTH, CANVAS_HEIGHT, seed, store)
    }

    pub fn with_canvas(
        canvas_width: f32,
        canvas_height: f32,
        seed: u64,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let mut rng = SimRng::new(seed);
        let profile = DifficultyProfile::default();
        let background = BackgroundManager::new(canvas_width, canvas_height, &mut rng);
        let power_ups = PowerUpManager::new(canvas_width, canvas_height, &mut rng);

        log::info!("Game created (seed {}, {}x{})", seed, canvas_width, canvas_height);

        Self {
            phase: GamePhase::Ready,
            score: 0,
            frame: 0,
            selected: profile.difficulty,
            screen: ScreenType::Desktop,
            profile,
            canvas_width,
            canvas_height,
            plane: Plane::new(PLANE_START_X, canvas_height / 2.0),
            obstacles: ObstacleManager::new(canvas_width, canvas_height, &profile),
            collectibles: CollectibleManager::new(),
            power_ups,
            particles: ParticleManager::default(),
            background,
            rng,
            trails: true,
            clouds: true,
            events: Vec::new(),
            store,
        }
    }

    /// Apply player preferences (effects, difficulty selection)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.particles.set_max_particles(settings.particle_cap());
        self.trails = settings.trails_enabled();
        self.clouds = settings.effects.draws_clouds();
        self.selected = settings.difficulty;
    }

    /// Route the primary action by phase
    pub fn handle_input(&mut self, action: InputAction) {
        match action {
            InputAction::Primary => match self.phase {
                GamePhase::Playing => {
                    self.plane.jump(&self.profile);
                    let c = self.plane.bounding_box().center();
                    self.particles.spawn_jump(self.plane.x, c.y, &mut self.rng);
                    self.emit(GameEvent::Sound(SoundEvent::Jump));
                }
                GamePhase::Ready => self.start_game(),
                GamePhase::GameOver => self.restart(),
            },
            InputAction::ToggleMute => {}
        }
    }

    /// Begin a run with the selected difficulty
    pub fn start_game(&mut self) {
        self.profile = DifficultyProfile::for_difficulty(self.selected).scaled_for(self.screen);
        self.score = 0;

        self.plane.reset(PLANE_START_X, self.canvas_height / 2.0);
        self.obstacles.reset(&self.profile);
        self.collectibles.reset();
        self.power_ups.reset(&mut self.rng);
        self.particles.clear();

        self.phase = GamePhase::Playing;
        self.emit(GameEvent::ScoreChanged(0));
        self.emit(GameEvent::Sound(SoundEvent::Start));
        self.emit(GameEvent::PhaseChanged(GamePhase::Playing));

        log::info!("Game started: {} ({:?})", self.profile.name(), self.screen);
    }

    /// Leave the game-over screen for the start screen
    pub fn restart(&mut self) {
        self.phase = GamePhase::Ready;
        self.emit(GameEvent::PhaseChanged(GamePhase::Ready));
        log::info!("Back to start screen");
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.frame += 1;
        self.background.update(&mut self.rng);

        if self.phase != GamePhase::Playing {
            return;
        }

        self.plane.update(&self.profile);
        let plane_box = self.plane.bounding_box();

        self.power_ups.update(&self.profile, &mut self.rng);
        if let Some(power_up) = self.power_ups.check_collision(&plane_box) {
            self.apply_power_up(&power_up);
        }

        if self.plane.check_bounds(self.canvas_width, self.canvas_height) {
            self.game_over();
            return;
        }

        if let Some(spawned) = self.obstacles.update(&self.profile, &mut self.rng) {
            if self.rng.chance(STAR_SPAWN_CHANCE) {
                let c = spawned.gap_center;
                self.collectibles.spawn_star(c.x, c.y, spawned.speed, &mut self.rng);
            }
        }

        self.collectibles.update();
        let stars = self.collectibles.check_collisions(&plane_box);
        if stars > 0 {
            self.award(stars * STAR_SCORE);
        }

        if let Some(index) = self.obstacles.check_collisions(&plane_box) {
            if self.plane.shielded {
                self.obstacles.destroy_obstacle(index);
                self.plane.deactivate_shield();
                let c = plane_box.center();
                self.particles.spawn_collision(c.x, c.y, &mut self.rng);
                self.emit(GameEvent::Sound(SoundEvent::ShieldBreak));
                log::debug!("Shield absorbed obstacle {}", index);
            } else {
                self.game_over();
                return;
            }
        }

        let passed = self.obstacles.check_score(self.plane.x);
        if passed > 0 {
            self.award(passed);
        }

        if self.trails && self.rng.chance(TRAIL_CHANCE) {
            let c = plane_box.center();
            self.particles.spawn_trail(self.plane.x, c.y, &mut self.rng);
        }

        self.particles.update();
    }

    fn apply_power_up(&mut self, power_up: &PowerUp) {
        match power_up.kind {
            PowerUpKind::Shield => self.plane.activate_shield(),
        }
        self.emit(GameEvent::Sound(SoundEvent::PowerUp));
        log::debug!("Collected {:?}", power_up.kind);
    }

    fn award(&mut self, points: u32) {
        self.score += points;
        let c = self.plane.bounding_box().center();
        self.particles.spawn_score(c.x, c.y, &mut self.rng);
        self.emit(GameEvent::Sound(SoundEvent::Score));
        self.emit(GameEvent::ScoreChanged(self.score));
    }

    /// End the run: crash burst, best-score bookkeeping, phase change
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;

        let c = self.plane.bounding_box().center();
        self.particles.spawn_collision(c.x, c.y, &mut self.rng);
        self.emit(GameEvent::Sound(SoundEvent::GameOver));

        let difficulty = self.profile.difficulty;
        if self.store.submit_best(&best_score_key(difficulty), self.score) {
            self.emit(GameEvent::NewBest {
                difficulty,
                score: self.score,
            });
            log::info!("New best score! ({}) {}", self.profile.name(), self.score);
        }

        self.emit(GameEvent::PhaseChanged(GamePhase::GameOver));
        log::info!("Game over! Score: {} ({})", self.score, self.profile.name());
    }

    /// Select a difficulty by name for the next run
    ///
    /// Unknown names leave the selection untouched and return false.
    pub fn set_difficulty(&mut self, name: &str) -> bool {
        match DifficultyProfile::by_name(name) {
            Some(profile) => {
                self.selected = profile.difficulty;
                log::info!("Difficulty selected: {}", profile.name());
                true
            }
            None => {
                log::warn!("Unknown difficulty '{}' ignored", name);
                false
            }
        }
    }

    /// Record the viewport class; takes effect at the next run start
    pub fn set_screen_type(&mut self, screen: ScreenType) {
        if self.screen != screen {
            log::debug!("Screen type {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Back-to-front drawables for the current frame
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new();
        scene.push(Drawable::Sky);

        if self.clouds {
            for cloud in self.background.clouds() {
                scene.push(Drawable::cloud(cloud));
            }
        }

        // Leftovers from the last run stay hidden on the start screen
        if self.phase != GamePhase::Ready {
            for obstacle in self.obstacles.obstacles() {
                let [top, bottom] = Drawable::pipes(obstacle);
                scene.push(top);
                scene.push(bottom);
            }
            for power_up in self.power_ups.power_ups() {
                scene.push(Drawable::power_up(power_up));
            }
            for star in self.collectibles.stars() {
                scene.push(Drawable::star(star));
            }
        }

        scene.push(Drawable::plane(&self.plane));

        for particle in self.particles.particles() {
            scene.push(Drawable::particle(particle));
        }

        scene
    }

    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            difficulty: self.profile.name(),
            x: self.plane.x,
            y: self.plane.y,
            velocity: self.plane.velocity,
            rotation: self.plane.rotation,
            obstacles: self.obstacles.len(),
            score: self.score,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Frames advanced since creation
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Profile of the current (or most recent) run
    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    /// Stored best for the selected difficulty
    pub fn best_score(&self) -> u32 {
        self.store.read_best(&best_score_key(self.selected))
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn plane_mut(&mut self) -> &mut Plane {
        &mut self.plane
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut ObstacleManager {
        &mut self.obstacles
    }

    pub fn collectibles(&self) -> &CollectibleManager {
        &self.collectibles
    }

    pub fn collectibles_mut(&mut self) -> &mut CollectibleManager {
        &mut self.collectibles
    }

    pub fn power_ups(&self) -> &PowerUpManager {
        &self.power_ups
    }

    pub fn power_ups_mut(&mut self) -> &mut PowerUpManager {
        &mut self.power_ups
    }

    pub fn particles(&self) -> &ParticleManager {
        &self.particles
    }

    pub fn background(&self) -> &BackgroundManager {
        &self.background
    }
}
