//! Rex Runner entry point
//!
//! Runs a seeded headless session driven by a simple autopilot and logs the
//! outcome. Usage: `rex-runner [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
use rex_runner::GameConfig;
#[cfg(not(target_arch = "wasm32"))]
use rex_runner::sim::{GameEvent, GameState, Observation, ObstacleKind, TickInput, tick};

/// Give up after this many ticks (five minutes of play)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 5;

/// Look-ahead, in ticks of travel, before the autopilot reacts
#[cfg(not(target_arch = "wasm32"))]
const REACTION_TICKS: f32 = 12.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("invalid config: {e}");
            std::process::exit(1);
        }
    };

    let mut jumps = 0u32;
    for _ in 0..MAX_TICKS {
        let input = autopilot(&state.observation());
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::Achievement(score) => log::info!("reached {score}"),
                _ => {}
            }
        }
        if state.is_crashed() {
            break;
        }
    }

    let obs = state.observation();
    log::info!(
        "run over after {} ticks: score {}, speed {:.2}, {} jumps, crashed: {}",
        state.time_ticks,
        obs.score,
        obs.speed,
        jumps,
        obs.crashed
    );
    println!("{}", obs.score);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(GameConfig::from_json(&json)?)
}

/// Jump over anything near and low, duck under mid-height birds
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(obs: &Observation) -> TickInput {
    let mut input = TickInput::default();
    let Some(obstacle) = obs.obstacle else {
        input.duck_released = obs.ducking;
        return input;
    };

    let player_right = obs.player_pos.x + obs.player_size.x;
    let ahead = obstacle.pos.x - player_right;
    let passed = obstacle.pos.x + obstacle.width < obs.player_pos.x;
    let near = !passed && ahead < (obs.speed * REACTION_TICKS) as i32;

    let obstacle_bottom = obstacle.pos.y + obstacle.height;
    let player_bottom = obs.player_pos.y + obs.player_size.y;
    // Birds this high clear a ducking player
    let overhead = obstacle.kind == ObstacleKind::Pterodactyl && obstacle_bottom <= player_bottom - 20;

    if near && overhead {
        input.duck_pressed = !obs.ducking && !obs.jumping;
    } else if near {
        input.duck_released = obs.ducking;
        input.jump_pressed = !obs.jumping && !obs.ducking;
    } else {
        input.duck_released = obs.ducking;
    }
    input
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web shell; the library is the only wasm target
}
