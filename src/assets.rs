//! Asset identifier keys
//!
//! Opaque texture keys handed to the [`RenderSink`](crate::render::RenderSink).
//! The core never interprets them; the host maps each key to whatever image
//! it loaded.

use crate::sim::state::{BlockKind, PowerUpKind};

pub const BALL: &str = "ball";

pub const BLOCK_SINGLE: &str = "block_single";
pub const BLOCK_DOUBLE: &str = "block_double";
pub const BLOCK_DOUBLE_WORN: &str = "block_double_worn";
pub const BLOCK_HIDDEN: &str = "block_hidden";
pub const BLOCK_HIDDEN_REVEALED: &str = "block_hidden_revealed";

pub const OVERLAY_MULTI_BALL: &str = "overlay_multi_ball";
pub const OVERLAY_MULTIPLIER: &str = "overlay_multiplier";

pub const DROP_MULTI_BALL: &str = "drop_multi_ball";
pub const DROP_MULTIPLIER_X2: &str = "drop_multiplier_x2";
pub const DROP_MULTIPLIER_X3: &str = "drop_multiplier_x3";
pub const DROP_MULTIPLIER_X4: &str = "drop_multiplier_x4";
pub const DROP_MULTIPLIER_X5: &str = "drop_multiplier_x5";

/// Base texture for a freshly spawned block
pub fn block_face(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::SingleHit => BLOCK_SINGLE,
        BlockKind::DoubleHit => BLOCK_DOUBLE,
        BlockKind::Hidden => BLOCK_HIDDEN,
    }
}

/// Overlay badge for a block carrying a power-up
pub fn power_up_overlay(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::MultiBall => OVERLAY_MULTI_BALL,
        PowerUpKind::ScoreMultiply => OVERLAY_MULTIPLIER,
    }
}

/// Texture for a falling drop. Multiplier drops advertise the multiplier the
/// player would reach by catching one now.
pub fn drop_sprite(kind: PowerUpKind, current_multiplier: u32) -> &'static str {
    match kind {
        PowerUpKind::MultiBall => DROP_MULTI_BALL,
        PowerUpKind::ScoreMultiply => {
            match (current_multiplier + 1).min(crate::consts::MAX_MULTIPLIER) {
                0..=2 => DROP_MULTIPLIER_X2,
                3 => DROP_MULTIPLIER_X3,
                4 => DROP_MULTIPLIER_X4,
                _ => DROP_MULTIPLIER_X5,
            }
        }
    }
}
