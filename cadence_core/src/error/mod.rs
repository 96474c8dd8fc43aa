//! Utilities for game engine error handling.

use std::io;

use thiserror::Error;

use crate::app::Pass;

/// Result of any operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// General error type of game engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ECS error: {0}")]
    Ecs(#[from] cadence_ecs::Error),

    #[error("cannot spawn pass thread: {0}")]
    ThreadSpawn(#[from] io::Error),

    #[error("{0} pass panicked")]
    PassPanicked(Pass),
}
