//! Dual-rate game engine core on top of the cadence ECS.
//!
//! Physics and general update passes run on their own threads,
//! paced by frame timestamps of the host display.

pub use cadence_ecs as ecs;

pub use app::{Game, GameLoop, GameWorld, GameWorldBuilder, Pass, PassClock, UpdateContext};

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod math;
pub mod performance;
pub mod system;
pub mod window;
