//! Hitbox catalogs for player poses and obstacle kinds
//!
//! Catalogs are plain configuration data. They are validated once when the
//! session is built, so lookups at tick time cannot fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;
use crate::config::ConfigError;

/// Player stance. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pose {
    Running,
    Jumping,
    Ducking,
}

impl Pose {
    pub const ALL: [Pose; 3] = [Pose::Running, Pose::Jumping, Pose::Ducking];

    #[inline]
    fn index(self) -> usize {
        match self {
            Pose::Running => 0,
            Pose::Jumping => 1,
            Pose::Ducking => 2,
        }
    }
}

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    CactusSmall,
    CactusLarge,
    Pterodactyl,
}

impl ObstacleKind {
    pub fn is_flying(&self) -> bool {
        matches!(self, ObstacleKind::Pterodactyl)
    }
}

/// Pose -> ordered local sub-boxes, every pose present
#[derive(Debug, Clone, PartialEq)]
pub struct PoseHitboxCatalog {
    boxes: [Vec<BoundingBox>; 3],
}

impl PoseHitboxCatalog {
    /// Build a catalog from a pose map, rejecting missing or empty entries
    pub fn from_map(map: &BTreeMap<Pose, Vec<BoundingBox>>) -> Result<Self, ConfigError> {
        let mut boxes: [Vec<BoundingBox>; 3] = Default::default();
        for pose in Pose::ALL {
            let entry = map.get(&pose).ok_or(ConfigError::MissingPose(pose))?;
            if entry.is_empty() {
                return Err(ConfigError::EmptyPoseHitboxes(pose));
            }
            check_dimensions(entry)?;
            boxes[pose.index()] = entry.clone();
        }
        Ok(Self { boxes })
    }

    /// Sub-boxes for `pose`, in iteration order
    #[inline]
    pub fn boxes(&self, pose: Pose) -> &[BoundingBox] {
        &self.boxes[pose.index()]
    }
}

/// Static description of one obstacle kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleType {
    pub kind: ObstacleKind,
    /// Width of one sprite unit
    pub width: i32,
    pub height: i32,
    /// Candidate y positions; one is picked at random per spawn
    pub y_positions: Vec<i32>,
    /// Below this speed the obstacle is always a single unit wide
    pub multiple_speed: f32,
    /// Kind is not spawned below this speed
    pub min_speed: f32,
    /// Base gap, scaled by the gap coefficient
    pub min_gap: i32,
    /// Relative weight under weighted selection
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Extra per-tick drift in either direction (flying kinds)
    #[serde(default)]
    pub speed_offset: f32,
    /// Local sub-boxes for a single-unit obstacle
    pub hitboxes: Vec<BoundingBox>,
}

fn default_weight() -> u32 {
    1
}

// Deserialized boxes skip the constructor's assert
fn check_dimensions(boxes: &[BoundingBox]) -> Result<(), ConfigError> {
    match boxes.iter().find(|b| b.width < 0 || b.height < 0) {
        Some(bad) => Err(ConfigError::NegativeHitbox(*bad)),
        None => Ok(()),
    }
}

impl ObstacleType {
    /// Sub-boxes for an obstacle `size` units wide
    ///
    /// With three or more boxes, the second stretches to fill the extra width
    /// and the last one is pinned to the right edge.
    pub fn hitboxes_for_size(&self, size: i32) -> Vec<BoundingBox> {
        let mut boxes = self.hitboxes.clone();
        if size > 1 && boxes.len() >= 3 {
            let total_width = self.width * size;
            let last = boxes.len() - 1;
            let middle_width = total_width - boxes[0].width - boxes[last].width;
            boxes[1] = boxes[1].with_width(middle_width);
            boxes[last] = boxes[last].with_x(total_width - boxes[last].width);
        }
        boxes
    }

    /// Check the type is usable for spawning and collision
    pub fn validate(&self, max_size: i32) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                kind: self.kind,
                width: self.width,
                height: self.height,
            });
        }
        if self.hitboxes.is_empty() {
            return Err(ConfigError::EmptyObstacleHitboxes(self.kind));
        }
        check_dimensions(&self.hitboxes)?;
        if self.y_positions.is_empty() {
            return Err(ConfigError::NoSpawnHeights(self.kind));
        }
        if self.min_gap < 0 {
            return Err(ConfigError::NegativeGap {
                what: "obstacle min_gap",
                value: self.min_gap,
            });
        }
        // The stretched middle box must keep a non-negative width at every size
        if self.hitboxes.len() >= 3 && max_size > 1 {
            let last = self.hitboxes.len() - 1;
            let fixed = self.hitboxes[0].width + self.hitboxes[last].width;
            if self.width * 2 < fixed {
                return Err(ConfigError::HitboxesTooWide(self.kind));
            }
        }
        Ok(())
    }
}

/// Classic t-rex sub-boxes
pub fn default_pose_hitboxes() -> BTreeMap<Pose, Vec<BoundingBox>> {
    let running = vec![
        BoundingBox::new(22, 0, 17, 16),
        BoundingBox::new(1, 18, 30, 9),
        BoundingBox::new(10, 35, 14, 8),
        BoundingBox::new(1, 24, 29, 5),
        BoundingBox::new(5, 30, 21, 4),
        BoundingBox::new(9, 34, 15, 4),
    ];
    let ducking = vec![BoundingBox::new(1, 18, 55, 25)];

    let mut map = BTreeMap::new();
    map.insert(Pose::Jumping, running.clone());
    map.insert(Pose::Running, running);
    map.insert(Pose::Ducking, ducking);
    map
}

/// Classic obstacle table: two cactus sizes and the pterodactyl
pub fn default_obstacle_types() -> Vec<ObstacleType> {
    vec![
        ObstacleType {
            kind: ObstacleKind::CactusSmall,
            width: 17,
            height: 35,
            y_positions: vec![105],
            multiple_speed: 4.0,
            min_speed: 0.0,
            min_gap: 120,
            weight: 4,
            speed_offset: 0.0,
            hitboxes: vec![
                BoundingBox::new(0, 7, 5, 27),
                BoundingBox::new(4, 0, 6, 34),
                BoundingBox::new(10, 4, 7, 14),
            ],
        },
        ObstacleType {
            kind: ObstacleKind::CactusLarge,
            width: 25,
            height: 50,
            y_positions: vec![90],
            multiple_speed: 7.0,
            min_speed: 0.0,
            min_gap: 120,
            weight: 3,
            speed_offset: 0.0,
            hitboxes: vec![
                BoundingBox::new(0, 12, 7, 38),
                BoundingBox::new(8, 0, 7, 49),
                BoundingBox::new(13, 10, 10, 38),
            ],
        },
        ObstacleType {
            kind: ObstacleKind::Pterodactyl,
            width: 46,
            height: 40,
            y_positions: vec![100, 75, 50],
            multiple_speed: 999.0,
            min_speed: 8.5,
            min_gap: 150,
            weight: 2,
            speed_offset: 0.8,
            hitboxes: vec![
                BoundingBox::new(15, 15, 16, 5),
                BoundingBox::new(18, 21, 24, 6),
                BoundingBox::new(2, 14, 4, 3),
                BoundingBox::new(6, 10, 4, 7),
                BoundingBox::new(10, 8, 6, 9),
            ],
        },
    ]
}
