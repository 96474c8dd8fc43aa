//! Standard systems of game engine.

pub use graveyard::GraveyardSystem;
pub use physics::PhysicsSystem;
pub use render::RenderSystem;

mod graveyard;
mod physics;
mod render;
