mod enemy;
mod particle;
mod player;
mod projectile;

use glam::Vec2;

use crate::geometry::Field;

// Re-export all public types
pub use enemy::{Edge, Enemy};
pub use particle::Particle;
pub use player::{MoveKeys, Player};
pub use projectile::Projectile;

/// Fixed fill colors, one per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Cyan,
    Yellow,
    Red,
    Orange,
}

/// Receives the draw calls entities emit during a frame
pub trait DrawTarget {
    fn fill_circle(&mut self, center: Vec2, radius: f32, tint: Tint);
    /// Axis-aligned square with its top-left corner at `corner`
    fn fill_square(&mut self, corner: Vec2, side: f32, tint: Tint);
}

/// World state an entity may read while updating
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub field: Field,
    pub keys: MoveKeys,
    pub player_pos: Vec2,
}

/// Capability shared by every entity kind
pub trait Entity {
    fn update(&mut self, ctx: &FrameContext);
    fn draw(&self, target: &mut dyn DrawTarget);
}
