//! Shared game handle and the async automatic-fall driver
//!
//! `GameHandle` serializes every operation through one async mutex and
//! publishes the fall timer on a watch channel after each operation.
//! `TickDriver` sleeps for the published interval and ticks the game; a timer
//! replacement (new interval, or a restart at the same interval) cancels the
//! pending sleep and starts a new one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

use blockfall_core::{GameSnapshot, GameState};
use blockfall_types::{ColorTag, GameAction, GameEvent, RotateDirection};

/// Fall timer as last installed by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSetting {
    pub interval_ms: Option<u32>,
    /// Scheduler generation; moves on whenever the timer is replaced
    pub generation: u64,
}

impl TimerSetting {
    fn of(state: &GameState) -> Self {
        Self {
            interval_ms: state.fall_interval_ms(),
            generation: state.scheduler().generation(),
        }
    }
}

/// Cloneable handle to a game shared between the shell and the driver
#[derive(Debug, Clone)]
pub struct GameHandle {
    state: Arc<Mutex<GameState>>,
    timer_tx: Arc<watch::Sender<TimerSetting>>,
    events_tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl GameHandle {
    pub fn new(state: GameState) -> Self {
        let (timer_tx, _) = watch::channel(TimerSetting::of(&state));
        Self {
            state: Arc::new(Mutex::new(state)),
            timer_tx: Arc::new(timer_tx),
            events_tx: None,
        }
    }

    /// Forward game events to `tx` (usually an event log)
    ///
    /// Without a sink, events are drained and dropped.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.events_tx = Some(tx);
        self
    }

    /// Receiver for fall timer replacements
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerSetting> {
        self.timer_tx.subscribe()
    }

    /// Run `f` with exclusive access, then publish the outcome
    pub async fn with_state<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        let mut state = self.state.lock().await;
        let out = f(&mut state);
        self.publish(&mut state);
        out
    }

    fn publish(&self, state: &mut GameState) {
        let timer = TimerSetting::of(state);
        self.timer_tx.send_if_modified(|current| {
            if *current == timer {
                return false;
            }
            *current = timer;
            true
        });

        for event in state.take_events() {
            if let Some(tx) = self.events_tx.as_ref() {
                let _ = tx.send(event);
            }
        }
    }

    pub async fn apply_action(&self, action: GameAction) -> bool {
        self.with_state(|game| game.apply_action(action)).await
    }

    pub async fn move_player(&self, dir: i32) -> bool {
        self.with_state(|game| game.move_player(dir)).await
    }

    pub async fn rotate_player(&self, direction: RotateDirection) -> bool {
        self.with_state(|game| game.rotate_player(direction)).await
    }

    pub async fn hard_drop(&self) -> bool {
        self.with_state(GameState::hard_drop).await
    }

    pub async fn tick(&self) -> bool {
        self.with_state(GameState::tick).await
    }

    pub async fn set_paused(&self, paused: bool) -> bool {
        self.with_state(|game| game.set_paused(paused)).await
    }

    pub async fn reset(&self, empty_color: ColorTag) {
        self.with_state(|game| game.reset(empty_color)).await
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.state.lock().await.snapshot()
    }
}

/// Background task ticking the game at its current fall interval
#[derive(Debug)]
pub struct TickDriver {
    task: JoinHandle<()>,
}

impl TickDriver {
    pub fn spawn(handle: GameHandle) -> Self {
        let mut timer_rx = handle.subscribe_timer();

        let task = tokio::spawn(async move {
            loop {
                let interval = timer_rx.borrow_and_update().interval_ms;
                match interval {
                    Some(ms) => {
                        tokio::select! {
                            _ = tokio::time::sleep(Duration::from_millis(ms as u64)) => {
                                handle.tick().await;
                            }
                            changed = timer_rx.changed() => {
                                if changed.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    // Paused or over: park until the interval comes back
                    None => {
                        if timer_rx.changed().await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { task }
    }

    /// Cancel the pending tick; no operation is interrupted mid-way
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
