//! The t-rex: pose state and jump physics

use glam::IVec2;

use super::catalog::Pose;
use super::collision::PlayerGeometry;
use crate::config::PlayerConfig;

/// The player character
#[derive(Debug, Clone)]
pub struct Trex {
    pub pos: IVec2,
    pub jumping: bool,
    pub ducking: bool,
    /// Duck pressed mid-air: fall faster
    pub speed_drop: bool,
    /// Completed jumps this run
    pub jump_count: u32,
    jump_velocity: f32,
    reached_min_height: bool,
    ground_y: i32,
    config: PlayerConfig,
}

impl Trex {
    pub fn new(config: PlayerConfig, ground_y: i32) -> Self {
        Self {
            pos: IVec2::new(config.start_x, ground_y),
            jumping: false,
            ducking: false,
            speed_drop: false,
            jump_count: 0,
            jump_velocity: 0.0,
            reached_min_height: false,
            ground_y,
            config,
        }
    }

    /// Current pose; ducking wins over jumping
    pub fn pose(&self) -> Pose {
        if self.ducking {
            Pose::Ducking
        } else if self.jumping {
            Pose::Jumping
        } else {
            Pose::Running
        }
    }

    pub fn geometry(&self) -> PlayerGeometry {
        PlayerGeometry {
            pos: self.pos,
            size: IVec2::new(self.config.width, self.config.height),
            pose: self.pose(),
        }
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    pub fn ground_y(&self) -> i32 {
        self.ground_y
    }

    /// Leave the ground; faster runs jump harder
    pub fn start_jump(&mut self, speed: f32) {
        if self.jumping {
            return;
        }
        self.jump_velocity = self.config.initial_jump_velocity - speed / 10.0;
        self.jumping = true;
        self.reached_min_height = false;
        self.speed_drop = false;
    }

    /// Cut the jump short once the minimum height has been reached
    pub fn end_jump(&mut self) {
        let drop_velocity = self.config.drop_velocity();
        if self.reached_min_height && self.jump_velocity < drop_velocity {
            self.jump_velocity = drop_velocity;
        }
    }

    /// Start falling fast
    pub fn set_speed_drop(&mut self) {
        self.speed_drop = true;
        self.jump_velocity = 1.0;
    }

    /// Duck or stand up. Ignored while airborne.
    pub fn set_duck(&mut self, ducking: bool) {
        if self.jumping && ducking {
            return;
        }
        self.ducking = ducking;
    }

    /// Advance the jump by one tick
    pub fn update_jump(&mut self) {
        if !self.jumping {
            return;
        }

        let velocity = if self.speed_drop {
            self.jump_velocity * self.config.speed_drop_coefficient
        } else {
            self.jump_velocity
        };
        self.pos.y += velocity.round() as i32;
        self.jump_velocity += self.config.gravity;

        if self.pos.y < self.ground_y - self.config.min_jump_height || self.speed_drop {
            self.reached_min_height = true;
        }
        if self.pos.y < self.config.max_jump_height || self.speed_drop {
            self.end_jump();
        }

        if self.pos.y > self.ground_y {
            self.land();
            self.jump_count += 1;
        }
    }

    /// Back on the ground, running
    pub fn land(&mut self) {
        self.pos.y = self.ground_y;
        self.jump_velocity = 0.0;
        self.jumping = false;
        self.ducking = false;
        self.speed_drop = false;
        self.reached_min_height = false;
    }

    /// Fresh run state
    pub fn reset(&mut self) {
        self.land();
        self.pos.x = self.config.start_x;
        self.jump_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trex() -> Trex {
        Trex::new(PlayerConfig::default(), 93)
    }

    fn run_jump(rex: &mut Trex) -> (u32, i32) {
        let mut ticks = 0;
        let mut apex = rex.pos.y;
        while rex.jumping {
            rex.update_jump();
            apex = apex.min(rex.pos.y);
            ticks += 1;
            assert!(ticks < 1000, "jump never landed");
        }
        (ticks, apex)
    }

    #[test]
    fn test_full_jump_lands() {
        let mut rex = trex();
        rex.start_jump(6.0);
        assert_eq!(rex.pose(), Pose::Jumping);

        let (ticks, apex) = run_jump(&mut rex);
        assert!(ticks > 10);
        assert!(apex < 93 - 30, "jump should clear the minimum height");
        assert_eq!(rex.pos.y, 93);
        assert_eq!(rex.pose(), Pose::Running);
        assert_eq!(rex.jump_count, 1);
    }

    #[test]
    fn test_start_jump_is_idempotent_mid_air() {
        let mut rex = trex();
        rex.start_jump(6.0);
        rex.update_jump();
        let v = rex.jump_velocity();
        rex.start_jump(6.0);
        assert_eq!(rex.jump_velocity(), v);
    }

    #[test]
    fn test_early_release_shortens_jump() {
        let mut full = trex();
        full.start_jump(6.0);
        let (full_ticks, full_apex) = run_jump(&mut full);

        let mut short = trex();
        short.start_jump(6.0);
        let mut ticks = 0;
        let mut apex = short.pos.y;
        while short.jumping {
            short.update_jump();
            short.end_jump();
            apex = apex.min(short.pos.y);
            ticks += 1;
        }
        assert!(ticks < full_ticks);
        assert!(apex > full_apex);
    }

    #[test]
    fn test_speed_drop_lands_sooner() {
        let mut normal = trex();
        normal.start_jump(6.0);
        let (normal_ticks, _) = run_jump(&mut normal);

        let mut dropped = trex();
        dropped.start_jump(6.0);
        for _ in 0..5 {
            dropped.update_jump();
        }
        dropped.set_speed_drop();
        let (rest, _) = run_jump(&mut dropped);
        assert!(5 + rest < normal_ticks);
        assert!(!dropped.speed_drop);
    }

    #[test]
    fn test_cannot_duck_mid_air() {
        let mut rex = trex();
        rex.start_jump(6.0);
        rex.set_duck(true);
        assert!(!rex.ducking);
        assert_eq!(rex.pose(), Pose::Jumping);
    }

    #[test]
    fn test_duck_and_stand() {
        let mut rex = trex();
        rex.set_duck(true);
        assert_eq!(rex.pose(), Pose::Ducking);
        assert_eq!(rex.geometry().pose, Pose::Ducking);
        rex.set_duck(false);
        assert_eq!(rex.pose(), Pose::Running);
    }
}
