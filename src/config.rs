//! Game configuration
//!
//! Every tunable constant is a named field here, with defaults matching the
//! classic runner. Configs can be loaded from JSON and must pass `validate`
//! before a session will start.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::catalog::{
    ObstacleKind, ObstacleType, Pose, PoseHitboxCatalog, default_obstacle_types,
    default_pose_hitboxes,
};
use crate::sim::geometry::BoundingBox;

/// Configuration errors, all detected before the first tick
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no hitboxes configured for pose {0:?}")]
    MissingPose(Pose),

    #[error("hitbox list for pose {0:?} is empty")]
    EmptyPoseHitboxes(Pose),

    #[error("hitbox list for obstacle {0:?} is empty")]
    EmptyObstacleHitboxes(ObstacleKind),

    #[error("hitbox {0:?} has a negative dimension")]
    NegativeHitbox(BoundingBox),

    #[error("first and last hitboxes of {0:?} are wider than a two-unit obstacle")]
    HitboxesTooWide(ObstacleKind),

    #[error("obstacle {kind:?} has invalid dimensions {width}x{height}")]
    InvalidDimensions {
        kind: ObstacleKind,
        width: i32,
        height: i32,
    },

    #[error("obstacle {0:?} has no spawn heights")]
    NoSpawnHeights(ObstacleKind),

    #[error("obstacle {0:?} is configured more than once")]
    DuplicateObstacleType(ObstacleKind),

    #[error("no obstacle types configured")]
    NoObstacleTypes,

    #[error("weighted selection needs at least one non-zero weight")]
    ZeroTotalWeight,

    #[error("{what} must not be negative, got {value}")]
    NegativeGap { what: &'static str, value: i32 },

    #[error("{what}: min {min} is greater than max {max}")]
    GapBounds {
        what: &'static str,
        min: i32,
        max: i32,
    },

    #[error("max obstacle length must be at least 1, got {0}")]
    InvalidObstacleLength(i32),

    #[error("max gap coefficient must be at least 1.0, got {0}")]
    MaxGapCoefficient(f32),

    #[error("gap coefficient must not be negative, got {0}")]
    GapCoefficient(f32),

    #[error("cloud size {width}x{height} is invalid")]
    InvalidCloud { width: i32, height: i32 },

    #[error("cloud frequency must be within 0.0..=1.0, got {0}")]
    CloudFrequency(f64),

    #[error("cloud speed must not be negative, got {0}")]
    CloudSpeed(f32),

    #[error("max clouds must be at least 1")]
    NoClouds,

    #[error("cloud sky band is inverted: top {top} is below bottom {bottom}")]
    SkyLevels { top: i32, bottom: i32 },

    #[error("speed range is invalid: start {start}, max {max}")]
    InvalidSpeed { start: f32, max: f32 },

    #[error("player dimensions {width}x{height} do not fit a border inset of {inset}")]
    InvalidPlayer { width: i32, height: i32, inset: i32 },

    #[error("border inset must not be negative, got {0}")]
    NegativeInset(i32),

    #[error("viewport {width}x{height} is invalid")]
    InvalidViewport { width: i32, height: i32 },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the spawner picks the next obstacle kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleSelection {
    /// Every eligible kind is equally likely
    #[default]
    Uniform,
    /// Eligible kinds are picked in proportion to their `weight`
    Weighted,
}

/// Viewport, speed curve and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub width: i32,
    pub height: i32,
    pub bottom_pad: i32,
    pub speed: f32,
    pub max_speed: f32,
    /// Speed gained per tick
    pub acceleration: f32,
    /// No obstacles spawn during this many ms of a fresh run
    pub clear_time_ms: f32,
    /// Jump cannot restart a crashed run until this many ms have passed
    pub gameover_clear_time_ms: f32,
    /// Inset applied to both coarse boxes
    pub border_inset: i32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bottom_pad: BOTTOM_PAD,
            speed: START_SPEED,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            clear_time_ms: CLEAR_TIME_MS,
            gameover_clear_time_ms: GAMEOVER_CLEAR_TIME_MS,
            border_inset: BORDER_INSET,
        }
    }
}

/// Player size and jump physics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub width: i32,
    pub height: i32,
    pub start_x: i32,
    pub gravity: f32,
    /// Negative is up
    pub initial_jump_velocity: f32,
    pub min_jump_height: i32,
    pub max_jump_height: i32,
    pub speed_drop_coefficient: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: REX_WIDTH,
            height: REX_HEIGHT,
            start_x: REX_START_X,
            gravity: GRAVITY,
            initial_jump_velocity: INITIAL_JUMP_VELOCITY,
            min_jump_height: MIN_JUMP_HEIGHT,
            max_jump_height: MAX_JUMP_HEIGHT,
            speed_drop_coefficient: SPEED_DROP_COEFFICIENT,
        }
    }
}

impl PlayerConfig {
    /// Velocity a jump is clamped to when released early
    pub fn drop_velocity(&self) -> f32 {
        self.initial_jump_velocity / 2.0
    }
}

/// Obstacle spacing rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonConfig {
    pub gap_coefficient: f32,
    pub max_gap_coefficient: f32,
    /// Largest size multiplier an obstacle can roll
    pub max_obstacle_length: i32,
    /// Most consecutive obstacles of one kind
    pub max_obstacle_duplication: usize,
    #[serde(default)]
    pub selection: ObstacleSelection,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            gap_coefficient: GAP_COEFFICIENT,
            max_gap_coefficient: MAX_GAP_COEFFICIENT,
            max_obstacle_length: MAX_OBSTACLE_LENGTH,
            max_obstacle_duplication: MAX_OBSTACLE_DUPLICATION,
            selection: ObstacleSelection::Uniform,
        }
    }
}

/// Background cloud layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub width: i32,
    pub height: i32,
    pub min_gap: i32,
    pub max_gap: i32,
    /// Smallest y a cloud is placed at
    pub sky_level_top: i32,
    /// Largest y a cloud is placed at
    pub sky_level_bottom: i32,
    pub max_clouds: usize,
    /// Chance per tick of adding a cloud once the gap has opened
    pub frequency: f64,
    /// Parallax factor relative to the ground scroll speed
    pub speed: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: CLOUD_WIDTH,
            height: CLOUD_HEIGHT,
            min_gap: MIN_CLOUD_GAP,
            max_gap: MAX_CLOUD_GAP,
            sky_level_top: SKY_LEVEL_TOP,
            sky_level_bottom: SKY_LEVEL_BOTTOM,
            max_clouds: MAX_CLOUDS,
            frequency: CLOUD_FREQUENCY,
            speed: BG_CLOUD_SPEED,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub horizon: HorizonConfig,
    #[serde(default)]
    pub clouds: CloudConfig,
    #[serde(default = "default_pose_hitboxes")]
    pub pose_hitboxes: BTreeMap<Pose, Vec<BoundingBox>>,
    #[serde(default = "default_obstacle_types")]
    pub obstacle_types: Vec<ObstacleType>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            player: PlayerConfig::default(),
            horizon: HorizonConfig::default(),
            clouds: CloudConfig::default(),
            pose_hitboxes: default_pose_hitboxes(),
            obstacle_types: default_obstacle_types(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing sections take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// y of the player's top edge when standing on the ground
    pub fn ground_y(&self) -> i32 {
        self.runner.height - self.player.height - self.runner.bottom_pad
    }

    /// Build the pose catalog, failing on any missing or empty pose
    pub fn pose_catalog(&self) -> Result<PoseHitboxCatalog, ConfigError> {
        PoseHitboxCatalog::from_map(&self.pose_hitboxes)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let runner = &self.runner;
        if runner.width <= 0 || runner.height <= 0 {
            return Err(ConfigError::InvalidViewport {
                width: runner.width,
                height: runner.height,
            });
        }
        if !(runner.speed > 0.0 && runner.max_speed >= runner.speed && runner.acceleration >= 0.0) {
            return Err(ConfigError::InvalidSpeed {
                start: runner.speed,
                max: runner.max_speed,
            });
        }
        if runner.border_inset < 0 {
            return Err(ConfigError::NegativeInset(runner.border_inset));
        }

        let player = &self.player;
        if player.width < 2 * runner.border_inset || player.height < 2 * runner.border_inset {
            return Err(ConfigError::InvalidPlayer {
                width: player.width,
                height: player.height,
                inset: runner.border_inset,
            });
        }

        self.pose_catalog()?;

        let horizon = &self.horizon;
        // With both coefficients in range every spawn draws from a non-empty,
        // non-negative gap range at any speed
        if !(horizon.gap_coefficient >= 0.0) {
            return Err(ConfigError::GapCoefficient(horizon.gap_coefficient));
        }
        if !(horizon.max_gap_coefficient >= 1.0) {
            return Err(ConfigError::MaxGapCoefficient(horizon.max_gap_coefficient));
        }
        if horizon.max_obstacle_length < 1 {
            return Err(ConfigError::InvalidObstacleLength(horizon.max_obstacle_length));
        }

        if self.obstacle_types.is_empty() {
            return Err(ConfigError::NoObstacleTypes);
        }
        let mut seen = Vec::with_capacity(self.obstacle_types.len());
        for ty in &self.obstacle_types {
            if seen.contains(&ty.kind) {
                return Err(ConfigError::DuplicateObstacleType(ty.kind));
            }
            seen.push(ty.kind);
            ty.validate(horizon.max_obstacle_length)?;
            // Coarse obstacle box is inset too
            if ty.width < 2 * runner.border_inset || ty.height < 2 * runner.border_inset {
                return Err(ConfigError::InvalidDimensions {
                    kind: ty.kind,
                    width: ty.width,
                    height: ty.height,
                });
            }
        }
        if horizon.selection == ObstacleSelection::Weighted
            && self.obstacle_types.iter().all(|t| t.weight == 0)
        {
            return Err(ConfigError::ZeroTotalWeight);
        }

        let clouds = &self.clouds;
        if clouds.width <= 0 || clouds.height <= 0 {
            return Err(ConfigError::InvalidCloud {
                width: clouds.width,
                height: clouds.height,
            });
        }
        if clouds.max_clouds == 0 {
            return Err(ConfigError::NoClouds);
        }
        if !(0.0..=1.0).contains(&clouds.frequency) {
            return Err(ConfigError::CloudFrequency(clouds.frequency));
        }
        if !(clouds.speed >= 0.0) {
            return Err(ConfigError::CloudSpeed(clouds.speed));
        }
        if clouds.min_gap < 0 {
            return Err(ConfigError::NegativeGap {
                what: "cloud min_gap",
                value: clouds.min_gap,
            });
        }
        if clouds.min_gap > clouds.max_gap {
            return Err(ConfigError::GapBounds {
                what: "cloud gap",
                min: clouds.min_gap,
                max: clouds.max_gap,
            });
        }
        if clouds.sky_level_top > clouds.sky_level_bottom {
            return Err(ConfigError::SkyLevels {
                top: clouds.sky_level_top,
                bottom: clouds.sky_level_bottom,
            });
        }

        Ok(())
    }
}
