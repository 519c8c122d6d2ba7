//! Fixed timestep simulation tick
//!
//! One entry point advances the whole session: gameplay physics while
//! playing, and the title / initials / leaderboard state machine around it.
//! The host calls [`tick`] once per fixed step and hands in its input
//! snapshot, render sink, and score store.

use glam::Vec2;

use super::collision::{self, Aabb, BounceAxis};
use super::level;
use super::state::{BlockKind, GameEvent, GamePhase, GameState, PowerUpKind};
use crate::assets;
use crate::consts::*;
use crate::highscores::{INITIALS_LEN, InitialsEntry};
use crate::persistence::KeyValueStore;
use crate::render::RenderSink;

/// Input snapshot for a single tick
///
/// The host owns the event wiring and folds whatever devices it has
/// (keyboard, pointer, touch) into one of these per frame. One-shot fields
/// (`launch`, `start`, the initials commands) should be cleared by the host
/// after the tick consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys / touch zones
    pub move_left: bool,
    pub move_right: bool,
    /// Absolute pointer position; overrides key movement when present
    pub pointer_x: Option<f32>,
    /// Release the held ball
    pub launch: bool,
    /// Start a game from the title, or leave the leaderboard early
    pub start: bool,
    /// Abandon the current run
    pub exit: bool,

    // Initials-entry commands
    pub cycle_up: bool,
    pub cycle_down: bool,
    pub cursor_left: bool,
    pub cursor_right: bool,
    pub typed: Option<char>,
    pub backspace: bool,
    pub submit: bool,

    /// Attract mode: the tick synthesizes its own inputs
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    renderer: &mut dyn RenderSink,
    store: &mut dyn KeyValueStore,
    dt: f32,
) {
    let mut input = input.clone();
    if input.idle_mode {
        synthesize_idle(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Title => {
            if input.start {
                start_game(state, renderer);
            }
        }
        GamePhase::Playing => update_playing(state, input, renderer, dt),
        GamePhase::GameOver | GamePhase::GameWon => route_after_run(state),
        GamePhase::EnteringInitials => update_initials(state, input, store),
        GamePhase::ShowingHighScores => {
            state.display_timer -= dt;
            if input.start || input.exit || state.display_timer <= 0.0 {
                state.phase = GamePhase::Title;
            }
        }
    }
}

/// Reset the session and drop into level 1
fn start_game(state: &mut GameState, renderer: &mut dyn RenderSink) {
    state.reset_for_new_session(renderer);
    state.phase = GamePhase::Playing;
    level::spawn_level(state, renderer, state.level);
    state.spawn_ball(renderer, true);
    state.events.push(GameEvent::GameStarted);
    log::info!("session started");
}

/// Clear the table and rebuild it for the given level
fn start_level(state: &mut GameState, renderer: &mut dyn RenderSink, next: u8) {
    state.reset_for_new_level(renderer);
    state.level = next;
    level::spawn_level(state, renderer, next);
    state.spawn_ball(renderer, true);
}

/// One gameplay step: timers, spawns, input, physics, rules
fn update_playing(
    state: &mut GameState,
    input: &TickInput,
    renderer: &mut dyn RenderSink,
    dt: f32,
) {
    // 1. countdowns
    state.tick_timers(dt);

    // 2. queued extra balls enter play at the paddle, already free.
    //    Spawning free also releases a ball still waiting on the paddle.
    while state.pending_extra_balls > 0 {
        state.pending_extra_balls -= 1;
        state.spawn_ball(renderer, false);
    }

    // 3. paddle and launch input
    if input.exit {
        enter_game_over(state, renderer, false);
        return;
    }
    if input.move_left {
        state.paddle_x -= PADDLE_SPEED * dt;
    }
    if input.move_right {
        state.paddle_x += PADDLE_SPEED * dt;
    }
    if let Some(x) = input.pointer_x {
        state.paddle_x = x;
    }
    let half = PADDLE_WIDTH / 2.0;
    state.paddle_x = state
        .paddle_x
        .clamp(PADDLE_MARGIN + half, FIELD_WIDTH - PADDLE_MARGIN - half);

    if input.launch && state.ball_is_held {
        state.ball_is_held = false;
        state.events.push(GameEvent::Bounce);
    }

    // The held ball rides the paddle instead of simulating
    if state.ball_is_held && !state.balls.is_empty() {
        let pos = Vec2::new(state.paddle_x, PADDLE_Y - PADDLE_HEIGHT / 2.0 - BALL_RADIUS);
        let ball = &mut state.balls[0];
        ball.pos = pos;
        if let Some(sprite) = ball.sprite {
            renderer.move_sprite(sprite, pos);
        }
    }

    // 4-5. ball motion, reflections, block hits
    let paddle = collision::paddle_rect(state.paddle_x);
    let step = BALL_SPEED * dt;
    let mut lost: Vec<usize> = Vec::new();

    for i in 0..state.balls.len() {
        if state.ball_is_held && i == 0 {
            continue;
        }

        {
            let ball = &mut state.balls[i];
            ball.pos.x += if ball.right { step } else { -step };
            ball.pos.y += if ball.up { -step } else { step };

            // Side and top walls reflect; position clamps back inside
            if ball.pos.x <= BALL_RADIUS {
                ball.pos.x = BALL_RADIUS;
                ball.right = true;
                state.events.push(GameEvent::Bounce);
            }
            if ball.pos.x >= FIELD_WIDTH - BALL_RADIUS {
                ball.pos.x = FIELD_WIDTH - BALL_RADIUS;
                ball.right = false;
                state.events.push(GameEvent::Bounce);
            }
            if ball.pos.y <= BALL_RADIUS {
                ball.pos.y = BALL_RADIUS;
                ball.up = false;
                state.events.push(GameEvent::Bounce);
            }

            // The bottom edge does not reflect - the ball is gone
            if ball.pos.y >= FIELD_HEIGHT + BALL_RADIUS {
                lost.push(i);
                continue;
            }

            // The paddle only catches a falling ball
            if !ball.up {
                let ball_box = Aabb::around(ball.pos, BALL_RADIUS);
                if ball_box.overlaps(&paddle) {
                    ball.up = true;
                    ball.pos.y = PADDLE_Y - PADDLE_HEIGHT / 2.0 - BALL_RADIUS;
                    state.events.push(GameEvent::Bounce);
                }
            }
        }

        // First active block whose box overlaps - at most one per ball
        // per tick
        let ball_box = Aabb::around(state.balls[i].pos, BALL_RADIUS);
        let mut hit: Option<(usize, BounceAxis)> = None;
        for (idx, block) in state.blocks.iter().enumerate() {
            if !block.active {
                continue;
            }
            if let Some(axis) = collision::bounce_axis(&ball_box, &collision::block_rect(block.pos))
            {
                hit = Some((idx, axis));
                break;
            }
        }
        if let Some((idx, axis)) = hit {
            {
                let ball = &mut state.balls[i];
                match axis {
                    BounceAxis::Horizontal { moving_right } => ball.right = moving_right,
                    BounceAxis::Vertical { moving_up } => ball.up = moving_up,
                }
            }
            hit_block(state, renderer, idx);
        }

        let ball = &state.balls[i];
        if let Some(sprite) = ball.sprite {
            renderer.move_sprite(sprite, ball.pos);
        }
    }

    // 6. falling power-ups
    let paddle_top = PADDLE_Y - PADDLE_HEIGHT / 2.0;
    let mut removed: Vec<usize> = Vec::new();
    let mut caught: Vec<PowerUpKind> = Vec::new();
    for (i, drop) in state.drops.iter_mut().enumerate() {
        drop.pos.y += DROP_FALL_SPEED * dt;
        if let Some(sprite) = drop.sprite {
            renderer.move_sprite(sprite, drop.pos);
        }

        if drop.pos.y > FIELD_HEIGHT + 20.0 {
            removed.push(i);
            continue;
        }

        let in_reach = drop.pos.x > state.paddle_x - PADDLE_WIDTH / 2.0
            && drop.pos.x < state.paddle_x + PADDLE_WIDTH / 2.0
            && drop.pos.y > paddle_top - 10.0
            && drop.pos.y < PADDLE_Y + 10.0;
        if in_reach {
            caught.push(drop.kind);
            removed.push(i);
        }
    }
    for &i in removed.iter().rev() {
        let drop = state.drops.remove(i);
        if let Some(sprite) = drop.sprite {
            renderer.destroy_sprite(sprite);
        }
    }
    for kind in caught {
        state.events.push(GameEvent::PowerUpCaught(kind));
        match kind {
            PowerUpKind::MultiBall => state.schedule_extra_ball(),
            PowerUpKind::ScoreMultiply => state.increase_multiplier(),
        }
    }

    // 7. lost balls leave in reverse index order; an empty field ends the run
    for &i in lost.iter().rev() {
        let ball = state.balls.remove(i);
        if let Some(sprite) = ball.sprite {
            renderer.destroy_sprite(sprite);
        }
        state.events.push(GameEvent::BallLost);
    }
    if state.balls.is_empty() && !state.ball_is_held {
        enter_game_over(state, renderer, false);
        return;
    }

    // 8. level progression
    if state.remaining_blocks == 0 {
        state.events.push(GameEvent::LevelCleared { level: state.level });
        log::info!("level {} cleared, score {}", state.level, state.score);
        if state.level >= FINAL_LEVEL {
            enter_game_over(state, renderer, true);
        } else {
            let next = state.level + 1;
            start_level(state, renderer, next);
        }
    }
}

/// Apply one hit to a block: score, damage visuals, destruction, drops
fn hit_block(state: &mut GameState, renderer: &mut dyn RenderSink, idx: usize) {
    state.increment_score();

    let block = &mut state.blocks[idx];
    block.hit_points -= 1;

    if block.hit_points == 0 {
        block.active = false;
        if let Some(sprite) = block.sprite.take() {
            renderer.destroy_sprite(sprite);
        }
        if let Some(overlay) = block.overlay.take() {
            renderer.destroy_sprite(overlay);
        }
        let pos = block.pos;
        let power_up = block.power_up;

        state.remaining_blocks -= 1;
        state.events.push(GameEvent::BlockDestroyed);
        if let Some(kind) = power_up {
            state.spawn_drop(renderer, pos, kind);
        }
    } else {
        // Damaged but standing: show it
        match block.kind {
            BlockKind::DoubleHit => {
                if let Some(sprite) = block.sprite {
                    renderer.set_texture(sprite, assets::BLOCK_DOUBLE_WORN);
                }
            }
            BlockKind::Hidden => {
                if let Some(sprite) = block.sprite {
                    renderer.set_texture(sprite, assets::BLOCK_HIDDEN_REVEALED);
                }
                // First reveal also uncovers the power-up badge
                if block.overlay.is_none() {
                    if let Some(kind) = block.power_up {
                        block.overlay = Some(
                            renderer.create_sprite(assets::power_up_overlay(kind), block.pos),
                        );
                    }
                }
            }
            BlockKind::SingleHit => {}
        }
        state.events.push(GameEvent::Bounce);
    }
}

/// Tear down the run and land on the terminal phase
fn enter_game_over(state: &mut GameState, renderer: &mut dyn RenderSink, won: bool) {
    state.clear_entities(renderer);
    state.phase = if won {
        GamePhase::GameWon
    } else {
        GamePhase::GameOver
    };
    state.events.push(if won {
        GameEvent::GameWon
    } else {
        GameEvent::GameOver
    });
    log::info!(
        "run ended ({}), final score {}",
        if won { "won" } else { "lost" },
        state.score
    );
}

/// From a finished run to initials entry or straight to the leaderboard
fn route_after_run(state: &mut GameState) {
    if state.is_new_high_score() {
        state.initials = InitialsEntry::default();
        state.phase = GamePhase::EnteringInitials;
        state.events.push(GameEvent::NewHighScore);
    } else {
        state.display_timer = HIGH_SCORE_DISPLAY_SECS;
        state.phase = GamePhase::ShowingHighScores;
    }
}

/// Apply initials-editing commands; submit records and moves on
fn update_initials(state: &mut GameState, input: &TickInput, store: &mut dyn KeyValueStore) {
    if input.cycle_up {
        state.initials.cycle_up();
    }
    if input.cycle_down {
        state.initials.cycle_down();
    }
    if input.cursor_left {
        state.initials.move_left();
    }
    if input.cursor_right {
        state.initials.move_right();
    }
    if let Some(c) = input.typed {
        state.initials.set_char(c);
    }
    if input.backspace {
        state.initials.backspace();
    }
    if input.submit {
        state.record_high_score(store);
        state.display_timer = HIGH_SCORE_DISPLAY_SECS;
        state.phase = GamePhase::ShowingHighScores;
    }
}

/// Attract-mode pilot: plays the game with the same inputs a person has
fn synthesize_idle(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Title => input.start = true,
        GamePhase::Playing => {
            if state.ball_is_held {
                input.launch = true;
            }
            // Track the lowest falling ball; with none to save, drift
            // toward the lowest drop
            let falling = state
                .balls
                .iter()
                .enumerate()
                .filter(|(i, ball)| !(state.ball_is_held && *i == 0) && !ball.up)
                .map(|(_, ball)| ball)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
            if let Some(ball) = falling {
                input.pointer_x = Some(ball.pos.x);
            } else if let Some(drop) = state
                .drops
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            {
                input.pointer_x = Some(drop.pos.x);
            }
        }
        GamePhase::EnteringInitials => {
            const NAME: [char; INITIALS_LEN] = ['B', 'O', 'T'];
            if state.initials.as_string() == "BOT" {
                input.submit = true;
            } else {
                input.typed = Some(NAME[state.initials.cursor()]);
            }
        }
        GamePhase::ShowingHighScores => input.start = true,
        GamePhase::GameOver | GamePhase::GameWon => {}
    }
}
