//! Game state and session lifecycle
//!
//! A session owns its config, the seeded RNG and every entity. Two sessions
//! built from the same config and seed, fed the same inputs, stay identical.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::ObstacleKind;
use super::collision::{CollisionDetector, CollisionResult};
use super::horizon::Horizon;
use super::obstacle::Obstacle;
use super::player::Trex;
use crate::config::{ConfigError, GameConfig};
use crate::ms_to_ticks;
use crate::score::DistanceMeter;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scrolling, player in control
    Running,
    /// Hit an obstacle; frozen until restarted
    Crashed,
}

/// Something the outer shell may want to react to (sound, vibration, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Crashed { score: u64, new_high_score: bool },
    /// Score crossed a multiple of the achievement distance
    Achievement(u64),
    Restarted,
}

/// Foremost obstacle as seen by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub pos: IVec2,
    pub width: i32,
    pub height: i32,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            kind: obstacle.kind,
            pos: obstacle.pos,
            width: obstacle.width,
            height: obstacle.height,
        }
    }
}

/// Read-only snapshot for controllers and autopilots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub crashed: bool,
    pub jumping: bool,
    pub ducking: bool,
    pub player_pos: IVec2,
    pub player_size: IVec2,
    pub speed: f32,
    pub viewport_width: i32,
    pub score: u64,
    pub high_score: u64,
    pub obstacle: Option<ObstacleView>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    config: GameConfig,
    pub(crate) detector: CollisionDetector,
    pub phase: GamePhase,
    /// Current scroll speed in pixels per tick
    pub speed: f32,
    /// Ticks since the run started
    pub time_ticks: u64,
    /// Ticks since the crash, while crashed
    pub crash_ticks: u64,
    pub meter: DistanceMeter,
    pub player: Trex,
    pub horizon: Horizon,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
    /// Verdict of the last collision check
    pub last_collision: CollisionResult,
    /// Runs started this session, including the first
    pub runs: u32,
}

impl GameState {
    /// Start a session. Fails if the config is invalid.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let detector = CollisionDetector::from_config(&config)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Trex::new(config.player.clone(), config.ground_y());
        let mut horizon = Horizon::new(&config);
        horizon.reset(&mut rng);

        log::info!(
            "session started: seed {seed}, viewport {}x{}",
            config.runner.width,
            config.runner.height
        );

        Ok(Self {
            seed,
            rng,
            speed: config.runner.speed,
            config,
            detector,
            phase: GamePhase::Running,
            time_ticks: 0,
            crash_ticks: 0,
            meter: DistanceMeter::new(),
            player,
            horizon,
            events: Vec::new(),
            last_collision: CollisionResult::Miss,
            runs: 1,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    /// Ticks of a fresh run with no obstacles
    pub fn clear_ticks(&self) -> u64 {
        ms_to_ticks(self.config.runner.clear_time_ms)
    }

    /// Ticks after a crash before jump restarts
    pub fn gameover_clear_ticks(&self) -> u64 {
        ms_to_ticks(self.config.runner.gameover_clear_time_ms)
    }

    pub fn is_crashed(&self) -> bool {
        self.phase == GamePhase::Crashed
    }

    /// Start a new run. The high score and the RNG stream carry over.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Running;
        self.speed = self.config.runner.speed;
        self.time_ticks = 0;
        self.crash_ticks = 0;
        self.meter.reset();
        self.player.reset();
        self.horizon.reset(&mut self.rng);
        self.last_collision = CollisionResult::Miss;
        self.runs += 1;
        self.events.push(GameEvent::Restarted);
        log::info!("run {} started (best {})", self.runs, self.meter.high_score);
    }

    /// Snapshot for a controller
    pub fn observation(&self) -> Observation {
        Observation {
            crashed: self.is_crashed(),
            jumping: self.player.jumping,
            ducking: self.player.ducking,
            player_pos: self.player.pos,
            player_size: self.player.geometry().size,
            speed: self.speed,
            viewport_width: self.config.runner.width,
            score: self.meter.score(),
            high_score: self.meter.high_score,
            obstacle: self.horizon.foremost().map(ObstacleView::from),
        }
    }
}
