//! Blockbreak entry point
//!
//! Runs a headless attract-mode session: the idle pilot plays through a
//! whole run at a fixed timestep, game events go to the log, and the final
//! leaderboard prints at the end. Pass a seed as the first argument to
//! replay a specific run.

use std::time::{SystemTime, UNIX_EPOCH};

use blockbreak::consts::SIM_DT;
use blockbreak::persistence::FileStore;
use blockbreak::render::NullRenderer;
use blockbreak::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let mut store = FileStore::new(".");
    let mut renderer = NullRenderer::default();
    let mut state = GameState::new(seed, &store);
    log::info!("attract run starting, seed {seed}");

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // Cap the run at 30 minutes of simulated play
    let max_ticks = (30.0 * 60.0 / SIM_DT) as u64;
    let mut started = false;
    let mut ticks = 0u64;

    for _ in 0..max_ticks {
        tick(&mut state, &input, &mut renderer, &mut store, SIM_DT);
        ticks += 1;

        for event in state.take_events() {
            match event {
                GameEvent::GameStarted => log::info!("game on"),
                GameEvent::LevelCleared { level } => {
                    log::info!("cleared level {level}, score {}", state.score);
                }
                GameEvent::PowerUpCaught(kind) => log::info!("caught {kind:?}"),
                GameEvent::BallLost => log::debug!("ball lost"),
                GameEvent::GameOver => log::info!("game over at level {}", state.level),
                GameEvent::GameWon => log::info!("game won!"),
                GameEvent::NewHighScore => log::info!("new high score: {}", state.score),
                GameEvent::Bounce | GameEvent::BlockDestroyed => {}
            }
        }

        if state.phase == GamePhase::Playing {
            started = true;
        }
        // One full loop of the state machine brings us back to the title
        if started && state.phase == GamePhase::Title {
            break;
        }
    }

    let minutes = ticks as f32 * SIM_DT / 60.0;
    println!("final score {} after {minutes:.1} simulated minutes", state.score);
    println!("--- high scores ---");
    for (rank, entry) in state.high_scores.entries().iter().enumerate() {
        println!("{:>2}. {} {:>8}", rank + 1, entry.initials, entry.score);
    }
}
