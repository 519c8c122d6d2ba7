//! Rendering seam
//!
//! The simulation owns entity lifetimes, so it creates and destroys sprite
//! handles, moves them, and swaps textures - but it never draws. The host
//! implements [`RenderSink`] on top of whatever surface it has; headless
//! callers (tests, the demo binary) use [`NullRenderer`].

use glam::Vec2;

/// Opaque handle for a sprite owned by the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u64);

/// Host-implemented rendering collaborator
///
/// Asset keys come from the [`assets`](crate::assets) module and are not
/// interpreted by the core.
pub trait RenderSink {
    fn create_sprite(&mut self, asset: &str, pos: Vec2) -> SpriteHandle;
    fn move_sprite(&mut self, sprite: SpriteHandle, pos: Vec2);
    fn set_texture(&mut self, sprite: SpriteHandle, asset: &str);
    fn destroy_sprite(&mut self, sprite: SpriteHandle);
}

/// Render sink that draws nothing, for headless simulation
#[derive(Debug, Default)]
pub struct NullRenderer {
    next_id: u64,
    live: usize,
}

impl NullRenderer {
    /// Number of sprites created and not yet destroyed
    pub fn live_sprites(&self) -> usize {
        self.live
    }
}

impl RenderSink for NullRenderer {
    fn create_sprite(&mut self, _asset: &str, _pos: Vec2) -> SpriteHandle {
        self.next_id += 1;
        self.live += 1;
        SpriteHandle(self.next_id)
    }

    fn move_sprite(&mut self, _sprite: SpriteHandle, _pos: Vec2) {}

    fn set_texture(&mut self, _sprite: SpriteHandle, _asset: &str) {}

    fn destroy_sprite(&mut self, _sprite: SpriteHandle) {
        self.live = self.live.saturating_sub(1);
    }
}
