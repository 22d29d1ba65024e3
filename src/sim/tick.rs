//! Fixed timestep simulation tick
//!
//! Order per tick: input, player physics, horizon (scroll, sweep, spawn),
//! collision against the foremost obstacle, then distance and speed.

use super::collision::{CollisionDebug, CollisionResult};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key went down
    pub jump_pressed: bool,
    /// Jump key came up; cuts a jump short
    pub jump_released: bool,
    /// Duck key went down; fast-falls while airborne
    pub duck_pressed: bool,
    pub duck_released: bool,
    /// Start a new run immediately
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    step(state, input, None);
}

/// Same as [`tick`], reporting every tested collision box to `debug`
pub fn tick_with_debug(state: &mut GameState, input: &TickInput, debug: &mut dyn CollisionDebug) {
    step(state, input, Some(debug));
}

fn step(state: &mut GameState, input: &TickInput, debug: Option<&mut dyn CollisionDebug>) {
    state.events.clear();

    if input.restart {
        state.restart();
        return;
    }

    if state.phase == GamePhase::Crashed {
        state.crash_ticks += 1;
        if input.jump_pressed && state.crash_ticks >= state.gameover_clear_ticks() {
            state.restart();
        }
        return;
    }

    apply_input(state, input);
    state.player.update_jump();
    state.time_ticks += 1;

    let spawn_obstacles = state.time_ticks > state.clear_ticks();
    state
        .horizon
        .update(state.speed, spawn_obstacles, &mut state.rng);

    let verdict = match state.horizon.foremost() {
        Some(obstacle) => {
            let player = state.player.geometry();
            match debug {
                Some(debug) => state.detector.detect_with_debug(obstacle, &player, debug),
                None => state.detector.detect(obstacle, &player),
            }
        }
        None => CollisionResult::Miss,
    };
    state.last_collision = verdict;

    if verdict.is_hit() {
        crash(state);
        return;
    }

    if let Some(milestone) = state.meter.add(state.speed) {
        log::debug!("achievement: {milestone}");
        state.events.push(GameEvent::Achievement(milestone));
    }

    let max_speed = state.config().runner.max_speed;
    if state.speed < max_speed {
        state.speed = (state.speed + state.config().runner.acceleration).min(max_speed);
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    if input.jump_pressed && !player.jumping && !player.ducking {
        player.start_jump(state.speed);
        state.events.push(GameEvent::Jumped);
    }

    if input.duck_pressed {
        if player.jumping {
            player.set_speed_drop();
        } else {
            player.set_duck(true);
        }
    }

    if input.jump_released {
        player.end_jump();
    }

    if input.duck_released {
        player.speed_drop = false;
        player.set_duck(false);
    }
}

fn crash(state: &mut GameState) {
    state.phase = GamePhase::Crashed;
    state.crash_ticks = 0;

    let score = state.meter.score();
    let new_high_score = state.meter.record_high_score();
    state.events.push(GameEvent::Crashed {
        score,
        new_high_score,
    });

    if let CollisionResult::Hit { player, obstacle } = state.last_collision {
        log::info!(
            "crashed at score {score} (best {}), speed {:.2}: {player:?} hit {obstacle:?}",
            state.meter.high_score,
            state.speed
        );
    }
}
