//! Background cloud layer
//!
//! Clouds scroll with the ground at a fraction of its speed. They never
//! collide and never affect obstacle spacing.

use glam::IVec2;
use rand::Rng;

use crate::config::CloudConfig;
use crate::consts::FRAME_MS;

/// A decorative cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub pos: IVec2,
    /// Distance that must open up behind this cloud before the next one
    pub gap: i32,
    pub remove: bool,
}

/// Owns the active clouds and spawns new ones
#[derive(Debug, Clone)]
pub struct CloudLayer {
    config: CloudConfig,
    viewport_width: i32,
    pub clouds: Vec<Cloud>,
}

impl CloudLayer {
    pub fn new(config: CloudConfig, viewport_width: i32) -> Self {
        let clouds = Vec::with_capacity(config.max_clouds);
        Self {
            config,
            viewport_width,
            clouds,
        }
    }

    /// Drop every cloud and start over with one at the right edge
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.clouds.clear();
        if self.config.max_clouds > 0 {
            self.add_cloud(rng);
        }
    }

    /// Place a cloud at the right edge with a fresh gap and height
    pub fn add_cloud(&mut self, rng: &mut impl Rng) {
        let y = rng.random_range(self.config.sky_level_top..=self.config.sky_level_bottom);
        let gap = rng.random_range(self.config.min_gap..=self.config.max_gap);
        self.clouds.push(Cloud {
            pos: IVec2::new(self.viewport_width, y),
            gap,
            remove: false,
        });
    }

    /// Pixels a cloud moves this tick
    pub fn step(&self, speed: f32) -> i32 {
        ((self.config.speed / 1000.0 * FRAME_MS * speed).ceil() as i32).max(1)
    }

    /// Advance one tick at ground `speed`
    pub fn update(&mut self, speed: f32, rng: &mut impl Rng) {
        if self.clouds.is_empty() {
            if self.config.max_clouds > 0 {
                self.add_cloud(rng);
            }
            return;
        }

        let step = self.step(speed);
        let width = self.config.width;
        for cloud in self.clouds.iter_mut().filter(|c| !c.remove) {
            cloud.pos.x -= step;
            if cloud.pos.x + width <= 0 {
                cloud.remove = true;
            }
        }

        let opened = self
            .clouds
            .last()
            .is_some_and(|last| self.viewport_width - last.pos.x > last.gap);
        if self.clouds.len() < self.config.max_clouds
            && opened
            && rng.random::<f64>() < self.config.frequency
        {
            self.add_cloud(rng);
        }

        self.clouds.retain(|c| !c.remove);
    }
}
