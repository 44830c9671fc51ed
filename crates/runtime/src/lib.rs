//! Runtime module - async driving of a blockfall game
//!
//! The core crate is purely synchronous; this crate puts it on a tokio
//! runtime so a shell only has to forward player intents and draw snapshots.
//!
//! # Components
//!
//! - [`driver::GameHandle`]: shared, serialized access to one `GameState`
//! - [`driver::TickDriver`]: background task applying automatic descent
//! - [`event_log::EventLog`]: optional JSON-lines log of game events
//! - [`config::RuntimeConfig`]: settings read from the environment
//!
//! Lifecycle messages go to stderr; stdout belongs to the shell.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_SEED`: RNG seed (default: 1)
//! - `BLOCKFALL_LIVES`: lives per game (default: 3)
//! - `BLOCKFALL_EMPTY_COLOR`: color tag of empty cells (default: "gray")
//! - `BLOCKFALL_LOG_PATH`: append game events to this file as JSON lines
//!
//! # Example
//!
//! ```no_run
//! use blockfall_runtime::{RuntimeConfig, Session};
//! use blockfall_types::GameAction;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let session = Session::start(RuntimeConfig::from_env()).await?;
//! session.handle().apply_action(GameAction::HardDrop).await;
//! let snapshot = session.handle().snapshot().await;
//! println!("score {}", snapshot.score);
//! session.shutdown().await
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::RuntimeConfig;
pub use driver::{GameHandle, TickDriver, TimerSetting};
pub use event_log::EventLog;

use anyhow::{Context, Result};

use blockfall_core::GameState;

/// A running game: shared handle, tick driver and optional event log
#[derive(Debug)]
pub struct Session {
    handle: GameHandle,
    driver: TickDriver,
    log: Option<EventLog>,
}

impl Session {
    /// Create the game and start automatic descent
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        let log = match config.log_path.as_deref() {
            Some(path) => {
                let log = EventLog::open(path).await?;
                eprintln!("[Runtime] logging events to {}", path);
                Some(log)
            }
            None => None,
        };

        let game = GameState::try_new(config.game).context("invalid game configuration")?;
        let mut handle = GameHandle::new(game);
        if let Some(log) = log.as_ref() {
            handle = handle.with_events(log.sender());
        }

        let driver = TickDriver::spawn(handle.clone());
        eprintln!("[Runtime] tick driver started");

        Ok(Self {
            handle,
            driver,
            log,
        })
    }

    pub fn handle(&self) -> &GameHandle {
        &self.handle
    }

    /// Stop the driver and flush the event log
    pub async fn shutdown(self) -> Result<()> {
        let Self {
            handle,
            driver,
            log,
        } = self;

        driver.stop();
        drop(driver);
        // The handle holds a log sender; the writer only drains once it is gone
        drop(handle);

        if let Some(log) = log {
            log.close().await?;
        }
        eprintln!("[Runtime] stopped");
        Ok(())
    }
}
