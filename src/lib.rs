// Library exports for testing
pub use config::GameConfig;
pub use entities::{
    DrawTarget, Edge, Enemy, Entity, FrameContext, MoveKeys, Particle, Player, Projectile, Tint,
};
pub use geometry::Field;
pub use sim::{GameEvent, Simulation, Stats};
pub use waves::Progression;

pub mod app;
pub mod combat;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod waves;
