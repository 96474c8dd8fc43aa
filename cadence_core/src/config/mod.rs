//! Configuration utilities for game engine and your game.

use semver::Version;

use cadence_ecs::DEFAULT_MAX_ENTITIES;

/// This struct represents general configuration of game engine.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    max_entities: usize,
    frame_queue: usize,
    profile_window: usize,
}

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version = ENGINE_VERSION_STR.parse().unwrap();
}

/// Default count of frames buffered for each pass.
pub const DEFAULT_FRAME_QUEUE: usize = 1;

/// Default count of samples used to compute average tick rate.
pub const DEFAULT_PROFILE_WINDOW: usize = 60;

impl Config {
    /// Creates new configuration with given name and version of your game.
    ///
    /// Other parameters are set to their defaults.
    ///
    pub const fn new(name: String, version: Version) -> Self {
        Self {
            name,
            version,
            max_entities: DEFAULT_MAX_ENTITIES,
            frame_queue: DEFAULT_FRAME_QUEUE,
            profile_window: DEFAULT_PROFILE_WINDOW,
        }
    }

    /// Sets maximal count of alive entities.
    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Sets count of frames buffered for each pass.
    ///
    /// A frame which arrives while the buffer is full is dropped for that pass.
    /// Zero is treated as one.
    ///
    pub fn with_frame_queue(mut self, frame_queue: usize) -> Self {
        self.frame_queue = frame_queue.max(1);
        self
    }

    /// Sets count of samples used to compute average tick rate.
    /// Zero is treated as one.
    pub fn with_profile_window(mut self, profile_window: usize) -> Self {
        self.profile_window = profile_window.max(1);
        self
    }

    /// Name of your game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Maximal count of alive entities.
    pub fn max_entities(&self) -> usize {
        self.max_entities
    }

    /// Count of frames buffered for each pass.
    pub fn frame_queue(&self) -> usize {
        self.frame_queue
    }

    /// Count of samples used to compute average tick rate.
    pub fn profile_window(&self) -> usize {
        self.profile_window
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("Hello World".to_string(), Version::new(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_entities(), 5000);
        assert_eq!(config.frame_queue(), 1);
        assert_eq!(config.profile_window(), 60);
        assert_eq!(ENGINE_NAME, "cadence_core");
        assert_eq!(ENGINE_VERSION.major, 0);
    }

    #[test]
    fn test_builder() {
        let config = Config::new("game".to_string(), Version::new(1, 2, 3))
            .with_max_entities(10)
            .with_frame_queue(0)
            .with_profile_window(4);
        assert_eq!(config.name(), "game");
        assert_eq!(config.version(), &Version::new(1, 2, 3));
        assert_eq!(config.max_entities(), 10);
        assert_eq!(config.frame_queue(), 1);
        assert_eq!(config.profile_window(), 4);
    }
}
