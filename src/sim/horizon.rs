//! Procedural horizon: obstacle spawning and recycling
//!
//! Obstacles live in a `Vec` ordered by spawn time, so the first entry is
//! always the one nearest the player. Each tick moves everything left,
//! sweeps what scrolled off, then places at most one new obstacle exactly
//! one gap behind the last.

use glam::IVec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::catalog::{ObstacleKind, ObstacleType};
use super::cloud::CloudLayer;
use super::obstacle::{Obstacle, gap_bounds, roll_gap, roll_size};
use crate::config::{GameConfig, HorizonConfig, ObstacleSelection};

/// Record of one obstacle placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRecord {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: i32,
    /// Distance from the previous placement's right edge, if there was one
    pub distance: Option<i32>,
    /// Bounds the previous placement's gap was drawn from
    pub gap_bounds: Option<(i32, i32)>,
}

/// Right edge and pending gap of the most recent placement
///
/// Scrolls with the obstacle it came from but outlives it, so a gap wider
/// than the viewport is still honoured exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Trailing {
    right: i32,
    gap: i32,
    bounds: (i32, i32),
    speed_offset: f32,
}

impl Trailing {
    fn step(&self, speed: f32) -> i32 {
        ((speed + self.speed_offset).ceil() as i32).max(1)
    }
}

/// Owns every scrolling environment entity
#[derive(Debug, Clone)]
pub struct Horizon {
    config: HorizonConfig,
    types: Vec<ObstacleType>,
    viewport_width: i32,
    pub obstacles: Vec<Obstacle>,
    pub clouds: CloudLayer,
    trailing: Option<Trailing>,
    /// Recent kinds, newest first
    history: Vec<ObstacleKind>,
    next_id: u32,
}

impl Horizon {
    /// Build from an already validated config
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.horizon.clone(),
            types: config.obstacle_types.clone(),
            viewport_width: config.runner.width,
            obstacles: Vec::new(),
            clouds: CloudLayer::new(config.clouds.clone(), config.runner.width),
            trailing: None,
            history: Vec::new(),
            next_id: 1,
        }
    }

    /// Clear all obstacles and clouds, seeding a single cloud
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.obstacles.clear();
        self.trailing = None;
        self.history.clear();
        self.clouds.reset(rng);
    }

    /// Obstacle nearest the player
    pub fn foremost(&self) -> Option<&Obstacle> {
        self.obstacles.first()
    }

    /// Advance one tick. Returns the placement made this tick, if any.
    pub fn update(
        &mut self,
        speed: f32,
        spawn_obstacles: bool,
        rng: &mut impl Rng,
    ) -> Option<SpawnRecord> {
        self.clouds.update(speed, rng);

        for obstacle in &mut self.obstacles {
            obstacle.update(speed);
        }
        self.obstacles.retain(|o| !o.remove);

        if let Some(trailing) = &mut self.trailing {
            trailing.right -= trailing.step(speed);
        }

        if !spawn_obstacles {
            return None;
        }
        self.spawn_if_due(speed, rng)
    }

    fn spawn_if_due(&mut self, speed: f32, rng: &mut impl Rng) -> Option<SpawnRecord> {
        let Some(trailing) = self.trailing else {
            return self.add_obstacle(self.viewport_width, None, speed, rng);
        };

        // The follower lands one gap behind; wait until that point is no more
        // than one step past the right edge so it scrolls in from off screen.
        let target = trailing.right + trailing.gap;
        if target > self.viewport_width + trailing.step(speed) {
            return None;
        }
        self.add_obstacle(target, Some(trailing), speed, rng)
    }

    fn add_obstacle(
        &mut self,
        x: i32,
        previous: Option<Trailing>,
        speed: f32,
        rng: &mut impl Rng,
    ) -> Option<SpawnRecord> {
        let Some(index) = self.choose_type(speed, rng) else {
            log::debug!("no obstacle kind eligible at speed {speed:.2}");
            // Start over at the edge once something becomes eligible
            self.trailing = None;
            return None;
        };
        let ty = &self.types[index];

        let size = roll_size(ty, speed, self.config.max_obstacle_length, rng);
        let y = ty.y_positions[rng.random_range(0..ty.y_positions.len())];
        let bounds = gap_bounds(ty.width * size, ty.min_gap, speed, &self.config);
        let gap = roll_gap(bounds, rng);

        let id = self.next_id;
        self.next_id += 1;

        let mut obstacle = Obstacle::new(id, ty, IVec2::new(x, y), size, gap, bounds);
        if ty.speed_offset != 0.0 {
            obstacle.speed_offset = if rng.random_bool(0.5) {
                ty.speed_offset
            } else {
                -ty.speed_offset
            };
        }

        log::debug!(
            "spawn obstacle {} {:?} x{} at ({}, {}), next gap {} in {:?}",
            id,
            ty.kind,
            size,
            x,
            y,
            gap,
            bounds
        );

        self.trailing = Some(Trailing {
            right: obstacle.right(),
            gap,
            bounds,
            speed_offset: obstacle.speed_offset,
        });
        self.history.insert(0, ty.kind);
        self.history.truncate(self.config.max_obstacle_duplication.max(1));
        self.obstacles.push(obstacle);

        Some(SpawnRecord {
            id,
            kind: ty.kind,
            x,
            distance: previous.map(|p| x - p.right),
            gap_bounds: previous.map(|p| p.bounds),
        })
    }

    /// Too many of `kind` in a row already
    fn is_duplicate(&self, kind: ObstacleKind) -> bool {
        let run = self.history.iter().take_while(|&&k| k == kind).count();
        run >= self.config.max_obstacle_duplication
    }

    /// Pick an obstacle type index among those allowed at `speed`
    ///
    /// The duplicate limit is dropped when it would leave nothing to pick.
    fn choose_type(&self, speed: f32, rng: &mut impl Rng) -> Option<usize> {
        let eligible = |allow_duplicate: bool| -> Vec<usize> {
            self.types
                .iter()
                .enumerate()
                .filter(|(_, t)| speed >= t.min_speed)
                .filter(|(_, t)| allow_duplicate || !self.is_duplicate(t.kind))
                .map(|(i, _)| i)
                .collect()
        };

        let mut candidates = eligible(false);
        if candidates.is_empty() {
            candidates = eligible(true);
        }
        if candidates.is_empty() {
            return None;
        }

        if self.config.selection == ObstacleSelection::Weighted {
            let weights = candidates.iter().map(|&i| self.types[i].weight);
            if let Ok(dist) = WeightedIndex::new(weights) {
                return Some(candidates[dist.sample(rng)]);
            }
            // Every eligible weight is zero: fall through to uniform
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}
