//! Error handling of ECS.

use thiserror::Error;

use super::{Entity, SystemId};

/// Result of any ECS operation which can fail.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("entity pool exhausted: all {capacity} entities are alive")]
    EntityPoolExhausted { capacity: usize },

    #[error("signature pool exhausted: at most {limit} component types can be registered")]
    SignaturePoolExhausted { limit: u32 },

    #[error("entity {0:?} was destroyed or never existed")]
    StaleEntity(Entity),

    #[error("system `{system}` has no signature set")]
    MissingSystemSignature { system: &'static str },

    #[error("system {0:?} is not registered")]
    UnknownSystem(SystemId),

    #[error("system `{system}` is already running")]
    SystemInUse { system: &'static str },
}
