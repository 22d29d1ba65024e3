//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod cloud;
pub mod collision;
pub mod geometry;
pub mod horizon;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use catalog::{ObstacleKind, ObstacleType, Pose, PoseHitboxCatalog};
pub use cloud::{Cloud, CloudLayer};
pub use collision::{BoxPairLog, CollisionDebug, CollisionDetector, CollisionResult, PlayerGeometry};
pub use geometry::{BoundingBox, boxes_overlap};
pub use horizon::{Horizon, SpawnRecord};
pub use obstacle::Obstacle;
pub use player::Trex;
pub use state::{GameEvent, GamePhase, GameState, Observation, ObstacleView};
pub use tick::{TickInput, tick, tick_with_debug};
