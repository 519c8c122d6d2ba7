//! Level generator
//!
//! Levels 1-3 are fixed geometric layouts; level 4 is a dense grid with
//! randomized block kinds. After placement a shuffled slice of blocks gets
//! the level's power-up allotment.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{BlockKind, GameState, PowerUpKind};
use crate::assets;
use crate::consts::*;
use crate::render::RenderSink;

/// Per-level power-up allotment: (multi-ball count, multiplier count)
fn power_up_counts(level: u8) -> (usize, usize) {
    match level {
        1 => (4, 2),
        2 => (6, 3),
        3 => (8, 4),
        4 => (15, 10),
        _ => (4, 2),
    }
}

/// Tear down any previous wall and build the one for `level`
pub fn spawn_level(state: &mut GameState, renderer: &mut dyn RenderSink, level: u8) {
    for block in state.blocks.drain(..) {
        if let Some(sprite) = block.sprite {
            renderer.destroy_sprite(sprite);
        }
        if let Some(overlay) = block.overlay {
            renderer.destroy_sprite(overlay);
        }
    }
    state.remaining_blocks = 0;

    match level {
        1 => spawn_diamond(state, renderer),
        2 => spawn_zigzag(state, renderer),
        3 => spawn_grid_with_hidden(state, renderer),
        _ => spawn_dense_random(state, renderer),
    }

    assign_power_ups(state, renderer, level);

    log::info!(
        "level {level} spawned with {} blocks",
        state.remaining_blocks
    );
}

/// Level 1: symmetric diamond of 32 single-hit blocks
fn spawn_diamond(state: &mut GameState, renderer: &mut dyn RenderSink) {
    const START_Y: f32 = 100.0;
    // (blocks in row, x of the first block's cell)
    const ROWS: [(usize, f32); 7] = [
        (8, 160.0),
        (6, 220.0),
        (6, 220.0),
        (4, 280.0),
        (4, 280.0),
        (2, 340.0),
        (2, 340.0),
    ];

    for (row, &(count, start_x)) in ROWS.iter().enumerate() {
        let y = START_Y + row as f32 * BLOCK_HEIGHT;
        for col in 0..count {
            let x = start_x + col as f32 * BLOCK_WIDTH + BLOCK_WIDTH / 2.0;
            state.spawn_block(renderer, Vec2::new(x, y), BlockKind::SingleHit);
        }
    }
}

/// Level 2: 7-row checkerboard, every third placed block double-hit
fn spawn_zigzag(state: &mut GameState, renderer: &mut dyn RenderSink) {
    const START_Y: f32 = 80.0;
    const ROWS: usize = 7;
    const COLS: usize = 10;

    let mut placed = 0usize;
    for row in 0..ROWS {
        for col in 0..COLS {
            // Even rows fill even columns, odd rows fill odd columns
            if (row + col) % 2 != 0 {
                continue;
            }
            let x = 100.0 + col as f32 * BLOCK_WIDTH + BLOCK_WIDTH / 2.0;
            let y = START_Y + row as f32 * BLOCK_HEIGHT + BLOCK_HEIGHT / 2.0;
            let kind = if placed % 3 == 0 {
                BlockKind::DoubleHit
            } else {
                BlockKind::SingleHit
            };
            state.spawn_block(renderer, Vec2::new(x, y), kind);
            placed += 1;
        }
    }
}

/// Level 3: 4x8 single-hit grid over a 2x6 belt of hidden blocks
fn spawn_grid_with_hidden(state: &mut GameState, renderer: &mut dyn RenderSink) {
    const START_Y: f32 = 80.0;

    for row in 0..4 {
        for col in 0..8 {
            let x = 160.0 + col as f32 * BLOCK_WIDTH + BLOCK_WIDTH / 2.0;
            let y = START_Y + row as f32 * BLOCK_HEIGHT + BLOCK_HEIGHT / 2.0;
            state.spawn_block(renderer, Vec2::new(x, y), BlockKind::SingleHit);
        }
    }

    for row in 0..2 {
        for col in 0..6 {
            let x = 220.0 + col as f32 * BLOCK_WIDTH + BLOCK_WIDTH / 2.0;
            let y = START_Y + (row + 5) as f32 * BLOCK_HEIGHT + BLOCK_HEIGHT / 2.0;
            state.spawn_block(renderer, Vec2::new(x, y), BlockKind::Hidden);
        }
    }
}

/// Level 4: full 10x12 grid, kinds drawn 60/25/15
fn spawn_dense_random(state: &mut GameState, renderer: &mut dyn RenderSink) {
    const START_Y: f32 = 60.0;
    const ROWS: usize = 10;
    const COLS: usize = 12;

    for row in 0..ROWS {
        for col in 0..COLS {
            let x = 40.0 + col as f32 * BLOCK_WIDTH + BLOCK_WIDTH / 2.0;
            let y = START_Y + row as f32 * BLOCK_HEIGHT + BLOCK_HEIGHT / 2.0;
            let roll: f32 = state.rng.random();
            let kind = if roll < 0.6 {
                BlockKind::SingleHit
            } else if roll < 0.85 {
                BlockKind::DoubleHit
            } else {
                BlockKind::Hidden
            };
            state.spawn_block(renderer, Vec2::new(x, y), kind);
        }
    }
}

/// Scatter the level's power-ups over distinct blocks
///
/// A Fisher-Yates shuffle of the block indices guarantees the multi-ball
/// and multiplier sets never overlap. Levels are sized so the allotment
/// never exceeds the block count.
fn assign_power_ups(state: &mut GameState, renderer: &mut dyn RenderSink, level: u8) {
    let (multi_ball, multiplier) = power_up_counts(level);

    let mut indices: Vec<usize> = (0..state.blocks.len()).collect();
    indices.shuffle(&mut state.rng);

    for (slot, &index) in indices.iter().enumerate() {
        let kind = if slot < multi_ball {
            PowerUpKind::MultiBall
        } else if slot < multi_ball + multiplier {
            PowerUpKind::ScoreMultiply
        } else {
            break;
        };

        let block = &mut state.blocks[index];
        block.power_up = Some(kind);
        // Hidden blocks keep their badge secret until revealed
        if block.kind != BlockKind::Hidden {
            block.overlay =
                Some(renderer.create_sprite(assets::power_up_overlay(kind), block.pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::render::NullRenderer;

    fn generate(level: u8, seed: u64) -> GameState {
        let mut state = GameState::new(seed, &MemoryStore::new());
        let mut renderer = NullRenderer::default();
        spawn_level(&mut state, &mut renderer, level);
        state
    }

    fn count_power_ups(state: &GameState, kind: PowerUpKind) -> usize {
        state
            .blocks
            .iter()
            .filter(|b| b.power_up == Some(kind))
            .count()
    }

    #[test]
    fn level_1_is_a_single_hit_diamond() {
        let state = generate(1, 1);
        assert_eq!(state.blocks.len(), 32);
        assert_eq!(state.remaining_blocks, 32);
        assert!(state.blocks.iter().all(|b| b.kind == BlockKind::SingleHit));
        assert_eq!(count_power_ups(&state, PowerUpKind::MultiBall), 4);
        assert_eq!(count_power_ups(&state, PowerUpKind::ScoreMultiply), 2);
    }

    #[test]
    fn level_2_mixes_in_double_hit_blocks() {
        let state = generate(2, 1);
        assert_eq!(state.blocks.len(), 35);
        // Placement indices 0, 3, 6, ... are double-hit: 12 of 35
        let doubles = state
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::DoubleHit)
            .count();
        assert_eq!(doubles, 12);
        assert_eq!(count_power_ups(&state, PowerUpKind::MultiBall), 6);
        assert_eq!(count_power_ups(&state, PowerUpKind::ScoreMultiply), 3);
    }

    #[test]
    fn level_3_hides_a_belt_below_the_grid() {
        let state = generate(3, 1);
        assert_eq!(state.blocks.len(), 44);
        let hidden: Vec<_> = state
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Hidden)
            .collect();
        assert_eq!(hidden.len(), 12);
        // The belt sits below every visible block
        let lowest_visible = state
            .blocks
            .iter()
            .filter(|b| b.kind != BlockKind::Hidden)
            .map(|b| b.pos.y)
            .fold(f32::MIN, f32::max);
        assert!(hidden.iter().all(|b| b.pos.y > lowest_visible));
    }

    #[test]
    fn level_4_fills_the_grid() {
        let state = generate(4, 99);
        assert_eq!(state.blocks.len(), 120);
        assert_eq!(count_power_ups(&state, PowerUpKind::MultiBall), 15);
        assert_eq!(count_power_ups(&state, PowerUpKind::ScoreMultiply), 10);
        // All three kinds should show up in a 120-cell draw
        for kind in [BlockKind::SingleHit, BlockKind::DoubleHit, BlockKind::Hidden] {
            assert!(
                state.blocks.iter().any(|b| b.kind == kind),
                "expected at least one {kind:?}"
            );
        }
    }

    #[test]
    fn power_ups_land_on_distinct_blocks() {
        for level in 1..=4 {
            let state = generate(level, 5);
            let assigned = state.blocks.iter().filter(|b| b.power_up.is_some()).count();
            let (m, k) = power_up_counts(level);
            assert_eq!(assigned, m + k, "level {level}");
        }
    }

    #[test]
    fn blocks_stay_inside_the_field() {
        for level in 1..=4 {
            let state = generate(level, 3);
            for block in &state.blocks {
                assert!(block.pos.x - BLOCK_WIDTH / 2.0 >= 0.0);
                assert!(block.pos.x + BLOCK_WIDTH / 2.0 <= FIELD_WIDTH);
                assert!(block.pos.y - BLOCK_HEIGHT / 2.0 >= 0.0);
                assert!(block.pos.y < PADDLE_Y);
            }
        }
    }

    #[test]
    fn hidden_blocks_spawn_without_overlay_badges() {
        let state = generate(3, 11);
        assert!(
            state
                .blocks
                .iter()
                .filter(|b| b.kind == BlockKind::Hidden)
                .all(|b| b.overlay.is_none())
        );
        // Visible carriers do get a badge
        assert!(
            state
                .blocks
                .iter()
                .filter(|b| b.kind != BlockKind::Hidden && b.power_up.is_some())
                .all(|b| b.overlay.is_some())
        );
    }

    #[test]
    fn respawning_a_level_releases_old_sprites() {
        let mut state = GameState::new(1, &MemoryStore::new());
        let mut renderer = NullRenderer::default();
        spawn_level(&mut state, &mut renderer, 1);
        let first_count = renderer.live_sprites();

        spawn_level(&mut state, &mut renderer, 1);
        assert_eq!(renderer.live_sprites(), first_count);
    }
}
