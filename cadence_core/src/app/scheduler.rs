//! Dual-rate scheduler of update passes.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::{Mutex, MutexGuard};

use cadence_ecs::{DeltaTime, Tick};

use crate::{
    app::{Game, Pass},
    config::Config,
    error::{Error, Result},
    performance::Performance,
};

/// Clock of a single pass which turns frame timestamps into ticks.
#[derive(Debug, Default, Clone)]
pub struct PassClock {
    previous: Option<u64>,
}

impl PassClock {
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Advances the clock to the frame `timestamp` in nanoseconds.
    ///
    /// Returns `None` for the first frame, which only starts the clock,
    /// and for frames which are not later than the previous one.
    ///
    pub fn advance(&mut self, timestamp: u64) -> Option<Tick> {
        let previous = match self.previous {
            None => {
                self.previous = Some(timestamp);
                return None;
            }
            Some(previous) if timestamp <= previous => {
                log::warn!(
                    "non-monotonic frame timestamp {} after {}, skipped",
                    timestamp,
                    previous,
                );
                return None;
            }
            Some(previous) => previous,
        };
        self.previous = Some(timestamp);
        let delta = DeltaTime::from_nanos(timestamp - previous);
        Some(Tick::new(timestamp, delta))
    }

    /// Timestamp of the last accepted frame, if any.
    pub fn previous(&self) -> Option<u64> {
        self.previous
    }
}

/// Runs the game in two passes, each on its own named thread.
///
/// Both passes are paced by frames passed into [`GameLoop::frame`].
/// The game is locked for the whole tick, so passes never overlap inside of it.
///
pub struct GameLoop<G> {
    game: Arc<Mutex<G>>,
    performance: Arc<Mutex<Performance>>,
    workers: Workers,
}

impl<G> GameLoop<G>
where
    G: Game,
{
    /// Spawns threads of both passes for the game.
    ///
    /// # Errors
    ///
    /// An error is returned if some thread could not be spawned.
    /// Threads spawned earlier are stopped in that case.
    ///
    pub fn start(game: G, config: &Config) -> Result<Self> {
        let game = Arc::new(Mutex::new(game));
        let performance = Arc::new(Mutex::new(Performance::new(config.profile_window())));
        let mut workers = Workers {
            running: Arc::new(AtomicBool::new(true)),
            workers: Vec::with_capacity(Pass::COUNT),
        };

        for pass in Pass::ALL {
            let (sender, receiver) = crossbeam_channel::bounded(config.frame_queue());
            let context = PassContext {
                pass,
                game: Arc::clone(&game),
                performance: Arc::clone(&performance),
                running: Arc::clone(&workers.running),
            };
            let handle = thread::Builder::new()
                .name(pass.name().to_string())
                .spawn(move || context.run(receiver))?;
            workers.workers.push(Worker {
                pass,
                sender: Some(sender),
                handle: Some(handle),
            });
        }
        log::info!("game loop started for `{}` {}", config.name(), config.version());

        Ok(Self {
            game,
            performance,
            workers,
        })
    }

    /// Delivers frame `timestamp` in nanoseconds to both passes.
    ///
    /// A pass which still has a full buffer of frames drops this one,
    /// so its next tick absorbs the skipped time.
    ///
    /// Returns count of passes which accepted the frame.
    ///
    pub fn frame(&self, timestamp: u64) -> usize {
        if !self.is_running() {
            return 0;
        }
        self.workers
            .workers
            .iter()
            .filter(|worker| worker.send(timestamp))
            .count()
    }

    /// Locks the game until returned guard is dropped.
    ///
    /// No pass ticks while the guard is alive.
    ///
    pub fn game(&self) -> MutexGuard<'_, G> {
        self.game.lock()
    }

    /// Snapshot of tick rate statistics of both passes.
    pub fn performance(&self) -> Performance {
        self.performance.lock().clone()
    }

    /// Returns `true` until the loop is stopped or some pass panicked.
    pub fn is_running(&self) -> bool {
        self.workers.running.load(Ordering::Acquire)
    }

    /// Stops accepting frames, lets ticks in progress finish and joins threads of both passes.
    ///
    /// # Errors
    ///
    /// An error is returned if some pass panicked.
    ///
    pub fn stop(mut self) -> Result<()> {
        self.workers.shutdown()
    }
}

struct Worker {
    pass: Pass,
    sender: Option<Sender<u64>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn send(&self, timestamp: u64) -> bool {
        let sender = match &self.sender {
            Some(sender) => sender,
            None => return false,
        };
        match sender.try_send(timestamp) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("{} pass is busy, frame {} dropped", self.pass, timestamp);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

struct Workers {
    running: Arc<AtomicBool>,
    workers: Vec<Worker>,
}

impl Workers {
    fn shutdown(&mut self) -> Result<()> {
        if self.workers.is_empty() {
            return Ok(());
        }
        self.running.store(false, Ordering::Release);
        // Disconnect channels so idle passes wake up.
        for worker in &mut self.workers {
            worker.sender.take();
        }

        let mut result = Ok(());
        for mut worker in self.workers.drain(..) {
            let handle = match worker.handle.take() {
                Some(handle) => handle,
                None => continue,
            };
            if handle.join().is_err() {
                log::error!("{} pass panicked", worker.pass);
                if result.is_ok() {
                    result = Err(Error::PassPanicked(worker.pass));
                }
            }
        }
        log::info!("game loop stopped");
        result
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        if let Err(error) = self.shutdown() {
            log::error!("game loop shutdown error: {}", error);
        }
    }
}

struct PassContext<G> {
    pass: Pass,
    game: Arc<Mutex<G>>,
    performance: Arc<Mutex<Performance>>,
    running: Arc<AtomicBool>,
}

impl<G> PassContext<G>
where
    G: Game,
{
    fn run(self, frames: Receiver<u64>) {
        log::debug!("{} pass started", self.pass);
        let mut clock = PassClock::new();
        for timestamp in frames {
            if !self.running.load(Ordering::Acquire) {
                break;
            }
            let tick = match clock.advance(timestamp) {
                Some(tick) => tick,
                None => continue,
            };

            self.performance.lock().record(self.pass, tick.delta);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let mut game = self.game.lock();
                self.pass.run(&mut *game, tick)
            }));
            match outcome {
                Ok(Ok(())) => (),
                Ok(Err(error)) => log::error!("{} pass tick failed: {}", self.pass, error),
                Err(payload) => {
                    // Game state is unknown after a panic, no pass ticks it anymore.
                    log::error!("{} pass panicked, stopping game loop", self.pass);
                    self.running.store(false, Ordering::Release);
                    panic::resume_unwind(payload);
                }
            }
        }
        log::debug!("{} pass finished", self.pass);
    }
}
