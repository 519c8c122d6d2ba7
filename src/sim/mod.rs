//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic: fixed timestep only, seeded RNG only, and no rendering or
//! storage dependencies beyond the injected collaborator traits.

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Aabb, BounceAxis, bounce_axis};
pub use level::spawn_level;
pub use state::{
    Ball, Block, BlockKind, GameEvent, GamePhase, GameState, PowerUpDrop, PowerUpKind,
};
pub use tick::{TickInput, tick};
