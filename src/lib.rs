//! Blockbreak - a classic block-breaker arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `highscores`: Top-10 leaderboard and the initials editor
//! - `persistence`: Key-value storage for the leaderboard
//! - `render`: Sprite-handle seam the host's renderer implements
//! - `assets`: Asset identifier keys handed to the render sink

pub mod assets;
pub mod highscores;
pub mod persistence;
pub mod render;
pub mod sim;

pub use highscores::{HighScores, InitialsEntry};
pub use persistence::KeyValueStore;
pub use render::{RenderSink, SpriteHandle};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz for arcade-accurate pacing)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play-field dimensions (screen-space pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults - 4 pixels per frame at 60 fps
    pub const BALL_SPEED: f32 = 240.0;
    pub const BALL_RADIUS: f32 = 8.0;

    /// Paddle geometry and movement
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 5.0;
    pub const PADDLE_Y: f32 = 550.0;
    pub const PADDLE_SPEED: f32 = 300.0;
    /// Distance the paddle keeps from the field edges
    pub const PADDLE_MARGIN: f32 = 10.0;

    /// Block cell size
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;

    /// Falling power-ups drop at half ball speed
    pub const DROP_FALL_SPEED: f32 = BALL_SPEED / 2.0;

    /// Timers (seconds)
    pub const MULTIPLIER_DURATION: f32 = 10.0;
    pub const EXTRA_BALL_DELAY: f32 = 5.0;
    pub const HIGH_SCORE_DISPLAY_SECS: f32 = 120.0;

    /// Score multiplier cap
    pub const MAX_MULTIPLIER: u32 = 5;

    /// Clearing this level wins the game
    pub const FINAL_LEVEL: u8 = 4;
}
