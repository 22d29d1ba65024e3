//! Obstacle entities and the rolls that shape them

use glam::IVec2;
use rand::Rng;

use super::catalog::{ObstacleKind, ObstacleType};
use super::geometry::BoundingBox;
use crate::config::HorizonConfig;

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner in screen space
    pub pos: IVec2,
    /// Number of sprite units side by side
    pub size: i32,
    /// Type width times `size`
    pub width: i32,
    pub height: i32,
    /// Local sub-boxes, already stretched for `size`
    pub hitboxes: Vec<BoundingBox>,
    /// Distance the next obstacle is placed behind this one's right edge
    pub gap: i32,
    /// Bounds `gap` was drawn from
    pub gap_bounds: (i32, i32),
    /// Extra per-tick drift (flying kinds)
    pub speed_offset: f32,
    /// Marked for the end-of-tick sweep
    pub remove: bool,
}

impl Obstacle {
    pub fn new(
        id: u32,
        ty: &ObstacleType,
        pos: IVec2,
        size: i32,
        gap: i32,
        gap_bounds: (i32, i32),
    ) -> Self {
        assert!(size >= 1, "obstacle size must be at least 1");
        assert!(gap >= 0, "obstacle gap must not be negative");
        Self {
            id,
            kind: ty.kind,
            pos,
            size,
            width: ty.width * size,
            height: ty.height,
            hitboxes: ty.hitboxes_for_size(size),
            gap,
            gap_bounds,
            speed_offset: 0.0,
            remove: false,
        }
    }

    /// Raw whole-entity box
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.width
    }

    /// Still at least partly on screen
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.right() > 0
    }

    /// Pixels moved per tick at `speed`, always at least one
    #[inline]
    pub fn step(&self, speed: f32) -> i32 {
        ((speed + self.speed_offset).ceil() as i32).max(1)
    }

    /// Scroll left one tick and flag for removal once fully off screen
    pub fn update(&mut self, speed: f32) {
        if self.remove {
            return;
        }
        self.pos.x -= self.step(speed);
        if !self.is_visible() {
            self.remove = true;
        }
    }
}

/// Gap bounds behind an obstacle `width` pixels wide
///
/// Faster play widens both bounds, so spacing stays surmountable.
pub fn gap_bounds(width: i32, base_gap: i32, speed: f32, config: &HorizonConfig) -> (i32, i32) {
    let min = (width as f32 * speed + base_gap as f32 * config.gap_coefficient).round() as i32;
    let min = min.max(0);
    let max = ((min as f32 * config.max_gap_coefficient).round() as i32).max(min);
    (min, max)
}

/// Draw a gap uniformly from `bounds`
pub fn roll_gap(bounds: (i32, i32), rng: &mut impl Rng) -> i32 {
    rng.random_range(bounds.0..=bounds.1)
}

/// Roll a size multiplier; slow play only gets single-unit obstacles
pub fn roll_size(ty: &ObstacleType, speed: f32, max_length: i32, rng: &mut impl Rng) -> i32 {
    let size = rng.random_range(1..=max_length);
    if size > 1 && ty.multiple_speed > speed {
        1
    } else {
        size
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::sim::catalog::default_obstacle_types;

    #[test]
    fn test_update_moves_by_rounded_up_speed() {
        let ty = &default_obstacle_types()[0];
        let mut obstacle = Obstacle::new(1, ty, IVec2::new(600, 105), 1, 200, (180, 270));
        obstacle.update(6.001);
        assert_eq!(obstacle.pos.x, 593);

        // Very slow play still moves
        obstacle.update(0.01);
        assert_eq!(obstacle.pos.x, 592);
    }

    #[test]
    fn test_flagged_once_fully_off_screen() {
        let ty = &default_obstacle_types()[0];
        let mut obstacle = Obstacle::new(1, ty, IVec2::new(-10, 105), 1, 0, (0, 0));
        obstacle.update(6.0);
        // Right edge at 1
        assert!(!obstacle.remove);
        obstacle.update(6.0);
        assert!(obstacle.remove);

        // Flagged obstacles stay put
        let x = obstacle.pos.x;
        obstacle.update(6.0);
        assert_eq!(obstacle.pos.x, x);
    }

    #[test]
    fn test_gap_bounds_scale_with_speed() {
        let config = HorizonConfig::default();
        // 17 * 6 + 120 * 0.6 = 174, * 1.5 = 261
        assert_eq!(gap_bounds(17, 120, 6.0, &config), (174, 261));

        let slow = gap_bounds(17, 120, 6.0, &config);
        let fast = gap_bounds(17, 120, 12.0, &config);
        assert!(fast.0 > slow.0 && fast.1 > slow.1);
    }

    #[test]
    fn test_gap_bounds_never_empty_or_negative() {
        let config = HorizonConfig {
            gap_coefficient: -10.0,
            max_gap_coefficient: 0.5,
            ..HorizonConfig::default()
        };
        let (min, max) = gap_bounds(17, 120, 6.0, &config);
        assert_eq!(min, 0);
        assert!(max >= min);

        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(roll_gap((min, max), &mut rng), 0);
    }

    #[test]
    fn test_roll_size_respects_multiple_speed() {
        let types = default_obstacle_types();
        let large = &types[1];
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..200 {
            assert_eq!(roll_size(large, 6.0, 3, &mut rng), 1);
        }
        let sizes: Vec<i32> = (0..200).map(|_| roll_size(large, 8.0, 3, &mut rng)).collect();
        assert!(sizes.iter().all(|s| (1..=3).contains(s)));
        assert!(sizes.iter().any(|&s| s > 1));
    }

    #[test]
    fn test_roll_gap_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..500 {
            let gap = roll_gap((174, 261), &mut rng);
            assert!((174..=261).contains(&gap));
        }
    }
}
