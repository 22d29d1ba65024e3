//! Rex Runner - A side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, horizon spawning, game state)
//! - `config`: Tunable constants, hitbox catalogs and validation
//! - `score`: Distance meter and in-memory high score

pub mod config;
pub mod score;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use score::DistanceMeter;

/// Game configuration constants
pub mod consts {
    /// Frames per second the simulation is tuned for
    pub const FPS: u32 = 60;
    /// Milliseconds per simulation tick
    pub const FRAME_MS: f32 = 1000.0 / FPS as f32;

    /// Viewport dimensions
    pub const DEFAULT_WIDTH: i32 = 600;
    pub const DEFAULT_HEIGHT: i32 = 150;
    /// Gap between the ground line and the bottom of the viewport
    pub const BOTTOM_PAD: i32 = 10;

    /// Inset applied to coarse boxes (1px white border baked into the sprites)
    pub const BORDER_INSET: i32 = 1;

    /// Scroll speed
    pub const START_SPEED: f32 = 6.0;
    pub const MAX_SPEED: f32 = 13.0;
    pub const ACCELERATION: f32 = 0.001;

    /// Obstacle-free grace period at the start of a run (ms)
    pub const CLEAR_TIME_MS: f32 = 3000.0;
    /// Delay after a crash before the jump key restarts (ms)
    pub const GAMEOVER_CLEAR_TIME_MS: f32 = 750.0;

    /// Obstacle spacing
    pub const GAP_COEFFICIENT: f32 = 0.6;
    pub const MAX_GAP_COEFFICIENT: f32 = 1.5;
    pub const MAX_OBSTACLE_LENGTH: i32 = 3;
    pub const MAX_OBSTACLE_DUPLICATION: usize = 2;

    /// Clouds
    pub const CLOUD_WIDTH: i32 = 46;
    pub const CLOUD_HEIGHT: i32 = 14;
    pub const MIN_CLOUD_GAP: i32 = 100;
    pub const MAX_CLOUD_GAP: i32 = 400;
    /// Highest point (smallest y) a cloud may sit at
    pub const SKY_LEVEL_TOP: i32 = 30;
    /// Lowest point (largest y) a cloud may sit at
    pub const SKY_LEVEL_BOTTOM: i32 = 71;
    pub const MAX_CLOUDS: usize = 6;
    pub const CLOUD_FREQUENCY: f64 = 0.5;
    pub const BG_CLOUD_SPEED: f32 = 0.2;

    /// Player (t-rex) defaults
    pub const REX_WIDTH: i32 = 44;
    pub const REX_HEIGHT: i32 = 47;
    pub const REX_START_X: i32 = 50;
    pub const GRAVITY: f32 = 0.6;
    pub const INITIAL_JUMP_VELOCITY: f32 = -12.0;
    /// Jump must climb at least this far above the ground before it can be cut short
    pub const MIN_JUMP_HEIGHT: i32 = 30;
    /// y above which (numerically below) a jump is forced to end
    pub const MAX_JUMP_HEIGHT: i32 = 30;
    pub const SPEED_DROP_COEFFICIENT: f32 = 3.0;

    /// Distance meter
    pub const DISTANCE_COEFFICIENT: f32 = 0.025;
    pub const ACHIEVEMENT_DISTANCE: u64 = 100;
}

/// Convert a duration in milliseconds to whole simulation ticks
#[inline]
pub fn ms_to_ticks(ms: f32) -> u64 {
    (ms / consts::FRAME_MS).round() as u64
}
