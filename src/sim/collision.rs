//! Collision detection between the player and an obstacle
//!
//! Two passes. A cheap coarse test against whole-entity boxes rejects the
//! common case; only when the coarse boxes overlap are the pose-specific
//! sub-boxes compared pair by pair.

use glam::IVec2;

use super::catalog::{Pose, PoseHitboxCatalog};
use super::geometry::{BoundingBox, boxes_overlap};
use super::obstacle::Obstacle;
use crate::config::{ConfigError, GameConfig};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    Miss,
    /// First overlapping pair found, both in world space
    Hit {
        player: BoundingBox,
        obstacle: BoundingBox,
    },
}

impl CollisionResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionResult::Hit { .. })
    }
}

/// Observer for the boxes tested during a check
///
/// Only for drawing or instrumentation. Implementations cannot influence the
/// verdict.
pub trait CollisionDebug {
    /// Padded coarse boxes, called once per check
    fn coarse_boxes(&mut self, _player: &BoundingBox, _obstacle: &BoundingBox) {}
    /// One world-space sub-box pair, called per pair tested
    fn fine_boxes(&mut self, _player: &BoundingBox, _obstacle: &BoundingBox) {}
}

/// Records every tested pair, in order
#[derive(Debug, Clone, Default)]
pub struct BoxPairLog {
    pub coarse: Vec<(BoundingBox, BoundingBox)>,
    pub fine: Vec<(BoundingBox, BoundingBox)>,
}

impl BoxPairLog {
    pub fn clear(&mut self) {
        self.coarse.clear();
        self.fine.clear();
    }
}

impl CollisionDebug for BoxPairLog {
    fn coarse_boxes(&mut self, player: &BoundingBox, obstacle: &BoundingBox) {
        self.coarse.push((*player, *obstacle));
    }

    fn fine_boxes(&mut self, player: &BoundingBox, obstacle: &BoundingBox) {
        self.fine.push((*player, *obstacle));
    }
}

/// What the detector needs to know about the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerGeometry {
    pub pos: IVec2,
    pub size: IVec2,
    pub pose: Pose,
}

/// Stateless collision checker over a validated pose catalog
#[derive(Debug, Clone)]
pub struct CollisionDetector {
    catalog: PoseHitboxCatalog,
    border_inset: i32,
}

impl CollisionDetector {
    pub fn new(catalog: PoseHitboxCatalog, border_inset: i32) -> Self {
        assert!(border_inset >= 0, "border inset must not be negative");
        Self {
            catalog,
            border_inset,
        }
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.pose_catalog()?, config.runner.border_inset))
    }

    pub fn catalog(&self) -> &PoseHitboxCatalog {
        &self.catalog
    }

    /// Padded whole-entity boxes: (player, obstacle)
    pub fn coarse_boxes(
        &self,
        obstacle: &Obstacle,
        player: &PlayerGeometry,
    ) -> (BoundingBox, BoundingBox) {
        let player_box = BoundingBox::from_origin_size(player.pos, player.size).inset(self.border_inset);
        let obstacle_box = obstacle.bounds().inset(self.border_inset);
        (player_box, obstacle_box)
    }

    /// Check one obstacle against the player
    pub fn detect(&self, obstacle: &Obstacle, player: &PlayerGeometry) -> CollisionResult {
        self.check(obstacle, player, None)
    }

    /// Same as [`detect`](Self::detect), reporting every tested box to `debug`
    pub fn detect_with_debug(
        &self,
        obstacle: &Obstacle,
        player: &PlayerGeometry,
        debug: &mut dyn CollisionDebug,
    ) -> CollisionResult {
        self.check(obstacle, player, Some(debug))
    }

    fn check(
        &self,
        obstacle: &Obstacle,
        player: &PlayerGeometry,
        mut debug: Option<&mut dyn CollisionDebug>,
    ) -> CollisionResult {
        let (player_box, obstacle_box) = self.coarse_boxes(obstacle, player);

        if let Some(debug) = debug.as_deref_mut() {
            debug.coarse_boxes(&player_box, &obstacle_box);
        }

        if !boxes_overlap(&player_box, &obstacle_box) {
            return CollisionResult::Miss;
        }

        // Sub-boxes are offsets from the padded origin, not the raw position
        let player_origin = player_box.origin();
        let obstacle_origin = obstacle_box.origin();

        for local_player in self.catalog.boxes(player.pose) {
            let player_sub = local_player.translated_by(player_origin);
            for local_obstacle in &obstacle.hitboxes {
                let obstacle_sub = local_obstacle.translated_by(obstacle_origin);

                if let Some(debug) = debug.as_deref_mut() {
                    debug.fine_boxes(&player_sub, &obstacle_sub);
                }

                if boxes_overlap(&player_sub, &obstacle_sub) {
                    log::trace!(
                        "hit: {:?} pose {:?} vs obstacle {} ({:?})",
                        player_sub,
                        player.pose,
                        obstacle.id,
                        obstacle_sub
                    );
                    return CollisionResult::Hit {
                        player: player_sub,
                        obstacle: obstacle_sub,
                    };
                }
            }
        }

        CollisionResult::Miss
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::sim::catalog::{ObstacleKind, ObstacleType};

    fn catalog_with(running: Vec<BoundingBox>) -> PoseHitboxCatalog {
        let mut map = BTreeMap::new();
        map.insert(Pose::Jumping, running.clone());
        map.insert(Pose::Ducking, running.clone());
        map.insert(Pose::Running, running);
        PoseHitboxCatalog::from_map(&map).unwrap()
    }

    fn block_type(width: i32, height: i32, hitboxes: Vec<BoundingBox>) -> ObstacleType {
        ObstacleType {
            kind: ObstacleKind::CactusSmall,
            width,
            height,
            y_positions: vec![0],
            multiple_speed: 999.0,
            min_speed: 0.0,
            min_gap: 0,
            weight: 1,
            speed_offset: 0.0,
            hitboxes,
        }
    }

    fn player_at(x: i32, y: i32) -> PlayerGeometry {
        PlayerGeometry {
            pos: IVec2::new(x, y),
            size: IVec2::new(12, 8),
            pose: Pose::Running,
        }
    }

    #[test]
    fn test_end_to_end_hit_reports_world_boxes() {
        let detector = CollisionDetector::new(catalog_with(vec![BoundingBox::new(0, 0, 10, 6)]), 1);
        let ty = block_type(8, 8, vec![BoundingBox::new(0, 0, 8, 8)]);
        let obstacle = Obstacle::new(1, &ty, IVec2::new(5, 1), 1, 0, (0, 0));

        let mut log = BoxPairLog::default();
        let result = detector.detect_with_debug(&obstacle, &player_at(1, 1), &mut log);

        // Player padded box (2,2,10,6); obstacle padded box (6,2,6,6)
        assert_eq!(
            log.coarse,
            vec![(BoundingBox::new(2, 2, 10, 6), BoundingBox::new(6, 2, 6, 6))]
        );
        assert_eq!(
            result,
            CollisionResult::Hit {
                player: BoundingBox::new(2, 2, 10, 6),
                obstacle: BoundingBox::new(6, 2, 8, 8),
            }
        );
        assert_eq!(log.fine.len(), 1);
    }

    #[test]
    fn test_end_to_end_miss_skips_fine_check() {
        let detector = CollisionDetector::new(catalog_with(vec![BoundingBox::new(0, 0, 10, 6)]), 1);
        let ty = block_type(8, 8, vec![BoundingBox::new(0, 0, 8, 8)]);
        // Padded obstacle starts at x=12, exactly where the padded player ends
        let obstacle = Obstacle::new(1, &ty, IVec2::new(11, 1), 1, 0, (0, 0));

        let mut log = BoxPairLog::default();
        let result = detector.detect_with_debug(&obstacle, &player_at(1, 1), &mut log);

        assert_eq!(result, CollisionResult::Miss);
        assert_eq!(log.coarse.len(), 1);
        assert!(log.fine.is_empty());
    }

    #[test]
    fn test_coarse_overlap_with_disjoint_subboxes_tests_full_product() {
        // Player boxes hug the top edge, obstacle boxes the bottom
        let detector = CollisionDetector::new(
            catalog_with(vec![BoundingBox::new(0, 0, 4, 2), BoundingBox::new(6, 0, 4, 2)]),
            1,
        );
        let ty = block_type(
            12,
            8,
            vec![
                BoundingBox::new(0, 4, 2, 2),
                BoundingBox::new(4, 4, 2, 2),
                BoundingBox::new(8, 4, 2, 2),
            ],
        );
        let obstacle = Obstacle::new(1, &ty, IVec2::new(1, 1), 1, 0, (0, 0));

        let mut log = BoxPairLog::default();
        let result = detector.detect_with_debug(&obstacle, &player_at(1, 1), &mut log);

        assert_eq!(result, CollisionResult::Miss);
        assert_eq!(log.fine.len(), 2 * 3);
    }

    #[test]
    fn test_first_pair_in_iteration_order_wins() {
        // P0 overlaps only O1, P1 overlaps only O0: (P0, O1) comes first
        let p0 = BoundingBox::new(20, 0, 4, 4);
        let p1 = BoundingBox::new(0, 0, 4, 4);
        let o0 = BoundingBox::new(0, 0, 4, 4);
        let o1 = BoundingBox::new(20, 0, 4, 4);

        let detector = CollisionDetector::new(catalog_with(vec![p0, p1]), 0);
        let ty = block_type(30, 10, vec![o0, o1]);
        let obstacle = Obstacle::new(1, &ty, IVec2::ZERO, 1, 0, (0, 0));
        let player = PlayerGeometry {
            pos: IVec2::ZERO,
            size: IVec2::new(30, 10),
            pose: Pose::Running,
        };

        let mut log = BoxPairLog::default();
        let result = detector.detect_with_debug(&obstacle, &player, &mut log);

        assert_eq!(
            result,
            CollisionResult::Hit {
                player: p0,
                obstacle: o1
            }
        );
        // (P0,O0) missed, (P0,O1) hit, iteration stopped
        assert_eq!(log.fine, vec![(p0, o0), (p0, o1)]);
    }

    #[test]
    fn test_debug_hook_does_not_change_verdict() {
        let detector = CollisionDetector::from_config(&GameConfig::default()).unwrap();
        let types = crate::sim::catalog::default_obstacle_types();
        let player = PlayerGeometry {
            pos: IVec2::new(50, 93),
            size: IVec2::new(44, 47),
            pose: Pose::Running,
        };

        for x in (0..120).step_by(3) {
            let obstacle = Obstacle::new(1, &types[1], IVec2::new(x, 90), 2, 0, (0, 0));
            let mut log = BoxPairLog::default();
            assert_eq!(
                detector.detect(&obstacle, &player),
                detector.detect_with_debug(&obstacle, &player, &mut log)
            );
        }
    }

    #[test]
    fn test_ducking_clears_high_pterodactyl() {
        let detector = CollisionDetector::from_config(&GameConfig::default()).unwrap();
        let ptero = crate::sim::catalog::default_obstacle_types()
            .into_iter()
            .find(|t| t.kind == ObstacleKind::Pterodactyl)
            .unwrap();
        let obstacle = Obstacle::new(1, &ptero, IVec2::new(60, 75), 1, 0, (0, 0));

        let mut player = PlayerGeometry {
            pos: IVec2::new(50, 93),
            size: IVec2::new(44, 47),
            pose: Pose::Running,
        };
        assert!(detector.detect(&obstacle, &player).is_hit());

        player.pose = Pose::Ducking;
        assert!(!detector.detect(&obstacle, &player).is_hit());
    }

    #[test]
    fn test_result_is_deterministic() {
        let detector = CollisionDetector::from_config(&GameConfig::default()).unwrap();
        let ty = &crate::sim::catalog::default_obstacle_types()[0];
        let obstacle = Obstacle::new(1, ty, IVec2::new(70, 105), 3, 0, (0, 0));
        let player = PlayerGeometry {
            pos: IVec2::new(50, 93),
            size: IVec2::new(44, 47),
            pose: Pose::Jumping,
        };
        let first = detector.detect(&obstacle, &player);
        for _ in 0..10 {
            assert_eq!(detector.detect(&obstacle, &player), first);
        }
    }
}
