//! Game state and core simulation types
//!
//! One mutable [`GameState`] record holds every entity, counter, and timer.
//! It is mutated only by the tick function and the phase-transition helpers,
//! all invoked serially by the host's frame loop.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets;
use crate::consts::*;
use crate::highscores::{HighScores, InitialsEntry};
use crate::persistence::KeyValueStore;
use crate::render::{RenderSink, SpriteHandle};

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Attract screen, waiting for a start input
    Title,
    /// Active gameplay
    Playing,
    /// Run ended by losing the last ball
    GameOver,
    /// Run ended by clearing the final level
    GameWon,
    /// Qualifying score, player is typing initials
    EnteringInitials,
    /// Leaderboard display, times out back to the title
    ShowingHighScores,
}

/// One-tick happenings the host may react to (sound cues, screen flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reflected off a wall, the paddle, or a surviving block
    Bounce,
    BlockDestroyed,
    BallLost,
    PowerUpCaught(PowerUpKind),
    LevelCleared { level: u8 },
    GameStarted,
    GameOver,
    GameWon,
    NewHighScore,
}

/// A ball in flight or held on the paddle
///
/// Direction is a pair of axis flags, not a velocity vector: the ball always
/// moves at `BALL_SPEED` diagonally, and collisions flip one flag.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Moving toward the top of the field (negative y)
    pub up: bool,
    /// Moving toward the right edge
    pub right: bool,
    pub sprite: Option<SpriteHandle>,
}

/// Block durability classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    SingleHit,
    DoubleHit,
    /// Invisible until first struck, then revealed; takes two hits
    Hidden,
}

impl BlockKind {
    /// Starting hit points for the kind
    pub fn hit_points(self) -> u8 {
        match self {
            BlockKind::SingleHit => 1,
            BlockKind::DoubleHit | BlockKind::Hidden => 2,
        }
    }
}

/// Power-up classes a block can carry and a drop can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Arms the delayed extra-ball timer
    MultiBall,
    /// Bumps the score multiplier
    ScoreMultiply,
}

/// A block in the wall
#[derive(Debug, Clone)]
pub struct Block {
    pub pos: Vec2,
    pub kind: BlockKind,
    pub power_up: Option<PowerUpKind>,
    /// Remaining hits; zero only once `active` is false
    pub hit_points: u8,
    pub active: bool,
    pub sprite: Option<SpriteHandle>,
    /// Power-up badge; hidden blocks get one only after being revealed
    pub overlay: Option<SpriteHandle>,
}

/// A power-up falling toward the paddle
#[derive(Debug, Clone)]
pub struct PowerUpDrop {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub sprite: Option<SpriteHandle>,
}

/// Complete game state for one session
#[derive(Debug)]
pub struct GameState {
    pub balls: Vec<Ball>,
    pub blocks: Vec<Block>,
    pub drops: Vec<PowerUpDrop>,

    /// Current level (1 through `FINAL_LEVEL`)
    pub level: u8,
    /// Count of blocks with `active = true`; zero completes the level
    pub remaining_blocks: u32,

    pub score: u64,
    /// Score multiplier, 1 through `MAX_MULTIPLIER`
    pub multiplier: u32,
    /// Seconds until the multiplier falls back to 1
    pub multiplier_timer: f32,
    /// One-shot countdown armed by a multi-ball pickup
    pub extra_ball_timer: f32,
    /// Balls queued for spawning once their countdown fired
    pub pending_extra_balls: u32,

    /// Paddle center, clamped to the field minus its margin
    pub paddle_x: f32,
    /// The first ball tracks the paddle until launched
    pub ball_is_held: bool,

    pub phase: GamePhase,
    /// Seconds left on the leaderboard display
    pub display_timer: f32,

    pub high_scores: HighScores,
    pub initials: InitialsEntry,

    /// Events produced this tick, drained by the host
    pub events: Vec<GameEvent>,

    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session on the title screen, loading the stored leaderboard
    pub fn new(seed: u64, store: &dyn KeyValueStore) -> Self {
        Self {
            balls: Vec::new(),
            blocks: Vec::new(),
            drops: Vec::new(),
            level: 1,
            remaining_blocks: 0,
            score: 0,
            multiplier: 1,
            multiplier_timer: 0.0,
            extra_ball_timer: 0.0,
            pending_extra_balls: 0,
            paddle_x: FIELD_WIDTH / 2.0,
            ball_is_held: true,
            phase: GamePhase::Title,
            display_timer: 0.0,
            high_scores: HighScores::load(store),
            initials: InitialsEntry::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Destroy every entity sprite and empty the collections
    pub fn clear_entities(&mut self, renderer: &mut dyn RenderSink) {
        for ball in self.balls.drain(..) {
            if let Some(sprite) = ball.sprite {
                renderer.destroy_sprite(sprite);
            }
        }
        for block in self.blocks.drain(..) {
            if let Some(sprite) = block.sprite {
                renderer.destroy_sprite(sprite);
            }
            if let Some(overlay) = block.overlay {
                renderer.destroy_sprite(overlay);
            }
        }
        for drop in self.drops.drain(..) {
            if let Some(sprite) = drop.sprite {
                renderer.destroy_sprite(sprite);
            }
        }
        self.remaining_blocks = 0;
    }

    /// Reset everything but the leaderboard to level-1 starting values
    pub fn reset_for_new_session(&mut self, renderer: &mut dyn RenderSink) {
        self.clear_entities(renderer);
        self.level = 1;
        self.score = 0;
        self.multiplier = 1;
        self.multiplier_timer = 0.0;
        self.extra_ball_timer = 0.0;
        self.pending_extra_balls = 0;
        self.paddle_x = FIELD_WIDTH / 2.0;
        self.ball_is_held = true;
        self.initials = InitialsEntry::default();
        self.display_timer = 0.0;
    }

    /// Clear balls and drops for the next level, keeping score and timers
    pub fn reset_for_new_level(&mut self, renderer: &mut dyn RenderSink) {
        for ball in self.balls.drain(..) {
            if let Some(sprite) = ball.sprite {
                renderer.destroy_sprite(sprite);
            }
        }
        for drop in self.drops.drain(..) {
            if let Some(sprite) = drop.sprite {
                renderer.destroy_sprite(sprite);
            }
        }
        self.pending_extra_balls = 0;
        self.ball_is_held = true;
    }

    /// Award one hit's worth of score at the current multiplier
    pub fn increment_score(&mut self) {
        self.score += self.multiplier as u64;
    }

    /// Bump the multiplier (capped) and restart its countdown
    pub fn increase_multiplier(&mut self) {
        if self.multiplier < MAX_MULTIPLIER {
            self.multiplier += 1;
        }
        // The countdown restarts even at the cap
        self.multiplier_timer = MULTIPLIER_DURATION;
    }

    /// Arm the one-shot countdown toward an extra ball
    pub fn schedule_extra_ball(&mut self) {
        self.extra_ball_timer = EXTRA_BALL_DELAY;
    }

    /// Advance the multiplier and extra-ball countdowns
    pub fn tick_timers(&mut self, dt: f32) {
        if self.multiplier_timer > 0.0 {
            self.multiplier_timer -= dt;
            if self.multiplier_timer <= 0.0 {
                self.multiplier_timer = 0.0;
                self.multiplier = 1;
            }
        }
        if self.extra_ball_timer > 0.0 {
            self.extra_ball_timer -= dt;
            if self.extra_ball_timer <= 0.0 {
                // One-shot: queue the spawn, do not re-arm
                self.extra_ball_timer = 0.0;
                self.pending_extra_balls += 1;
            }
        }
    }

    /// Whether the session's score earns a leaderboard spot
    pub fn is_new_high_score(&self) -> bool {
        self.high_scores.qualifies(self.score)
    }

    /// Submit the edited initials and persist the leaderboard
    pub fn record_high_score(&mut self, store: &mut dyn KeyValueStore) {
        let initials = self.initials.as_string();
        self.high_scores.record(store, &initials, self.score);
    }

    /// Spawn a ball at the rest position above the paddle
    ///
    /// `held` also sets the global held flag, so a free spawn releases a
    /// ball still waiting on the paddle - launching it.
    pub fn spawn_ball(&mut self, renderer: &mut dyn RenderSink, held: bool) {
        let pos = Vec2::new(
            self.paddle_x,
            PADDLE_Y - PADDLE_HEIGHT / 2.0 - BALL_RADIUS,
        );
        let sprite = renderer.create_sprite(assets::BALL, pos);
        let right = self.rng.random();
        self.balls.push(Ball {
            pos,
            up: true,
            right,
            sprite: Some(sprite),
        });
        self.ball_is_held = held;
    }

    /// Spawn a block and grow the remaining-block count
    pub fn spawn_block(&mut self, renderer: &mut dyn RenderSink, pos: Vec2, kind: BlockKind) {
        let sprite = renderer.create_sprite(assets::block_face(kind), pos);
        self.blocks.push(Block {
            pos,
            kind,
            power_up: None,
            hit_points: kind.hit_points(),
            active: true,
            sprite: Some(sprite),
            overlay: None,
        });
        self.remaining_blocks += 1;
    }

    /// Spawn a falling power-up where a block was destroyed
    pub fn spawn_drop(&mut self, renderer: &mut dyn RenderSink, pos: Vec2, kind: PowerUpKind) {
        let sprite = renderer.create_sprite(assets::drop_sprite(kind, self.multiplier), pos);
        self.drops.push(PowerUpDrop {
            pos,
            kind,
            sprite: Some(sprite),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::render::NullRenderer;

    fn fresh_state() -> GameState {
        GameState::new(7, &MemoryStore::new())
    }

    #[test]
    fn score_accumulates_by_multiplier() {
        let mut state = fresh_state();
        for _ in 0..5 {
            state.increment_score();
        }
        assert_eq!(state.score, 5);

        state.increase_multiplier();
        state.increase_multiplier();
        assert_eq!(state.multiplier, 3);
        for _ in 0..4 {
            state.increment_score();
        }
        assert_eq!(state.score, 5 + 4 * 3);
    }

    #[test]
    fn multiplier_caps_and_always_rearms_the_timer() {
        let mut state = fresh_state();
        for _ in 0..10 {
            state.increase_multiplier();
        }
        assert_eq!(state.multiplier, MAX_MULTIPLIER);

        state.multiplier_timer = 0.25;
        state.increase_multiplier();
        assert_eq!(state.multiplier, MAX_MULTIPLIER);
        assert_eq!(state.multiplier_timer, MULTIPLIER_DURATION);
    }

    #[test]
    fn multiplier_expiry_resets_to_one() {
        let mut state = fresh_state();
        state.increase_multiplier();
        assert_eq!(state.multiplier, 2);

        state.tick_timers(MULTIPLIER_DURATION - 0.5);
        assert_eq!(state.multiplier, 2);
        state.tick_timers(1.0);
        assert_eq!(state.multiplier, 1);
        assert_eq!(state.multiplier_timer, 0.0);
    }

    #[test]
    fn extra_ball_timer_fires_once() {
        let mut state = fresh_state();
        state.schedule_extra_ball();
        state.tick_timers(EXTRA_BALL_DELAY + 0.1);
        assert_eq!(state.pending_extra_balls, 1);

        // Expired countdown must not re-arm itself
        state.tick_timers(EXTRA_BALL_DELAY + 0.1);
        assert_eq!(state.pending_extra_balls, 1);

        state.schedule_extra_ball();
        state.tick_timers(EXTRA_BALL_DELAY + 0.1);
        assert_eq!(state.pending_extra_balls, 2);
    }

    #[test]
    fn session_reset_preserves_the_leaderboard() {
        let mut store = MemoryStore::new();
        let mut renderer = NullRenderer::default();
        let mut state = GameState::new(7, &store);
        state.record_high_score(&mut store);
        let entries = state.high_scores.entries().to_vec();

        state.score = 999;
        state.level = 3;
        state.reset_for_new_session(&mut renderer);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_scores.entries(), entries.as_slice());
    }

    #[test]
    fn level_reset_keeps_score_and_multiplier() {
        let mut renderer = NullRenderer::default();
        let mut state = fresh_state();
        state.spawn_ball(&mut renderer, false);
        state.spawn_drop(&mut renderer, Vec2::new(100.0, 100.0), PowerUpKind::MultiBall);
        state.score = 42;
        state.increase_multiplier();

        state.reset_for_new_level(&mut renderer);
        assert!(state.balls.is_empty());
        assert!(state.drops.is_empty());
        assert!(state.ball_is_held);
        assert_eq!(state.score, 42);
        assert_eq!(state.multiplier, 2);
        assert_eq!(renderer.live_sprites(), 0);
    }

    #[test]
    fn clear_entities_destroys_every_sprite() {
        let mut renderer = NullRenderer::default();
        let mut state = fresh_state();
        state.spawn_ball(&mut renderer, true);
        state.spawn_block(&mut renderer, Vec2::new(50.0, 50.0), BlockKind::DoubleHit);
        state.spawn_drop(&mut renderer, Vec2::new(60.0, 60.0), PowerUpKind::ScoreMultiply);
        assert_eq!(renderer.live_sprites(), 3);

        state.clear_entities(&mut renderer);
        assert_eq!(renderer.live_sprites(), 0);
        assert_eq!(state.remaining_blocks, 0);
    }
}
