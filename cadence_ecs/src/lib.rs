//! Entity Component System (ECS) utilities for game engine.
//!
//! Entities are generational handles, components live in dense per-type
//! storages and systems subscribe to entities through bitmask [`Signature`]s.

pub use component::{Component, ComponentRegistry, ComponentStorage};
pub use entity::{Entity, EntityManager, DEFAULT_MAX_ENTITIES};
pub use error::{Error, Result};
pub use signature::{Signature, SignatureAllocator};
pub use system::{Requirement, System, SystemId, SystemRegistry};
pub use time::{DeltaTime, Tick};
pub use world::{EntityBuilder, World};

mod component;
mod entity;
mod error;
mod signature;
mod system;
mod time;
mod world;
