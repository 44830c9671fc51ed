//! JSON-lines event log
//!
//! Events are handed to a writer task over an unbounded channel and appended
//! to the file one JSON object per line. Write failures end the task; the
//! game keeps running without a log.

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use blockfall_types::GameEvent;

/// Handle to the log writer task
#[derive(Debug)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<GameEvent>,
    task: JoinHandle<()>,
}

impl EventLog {
    /// Open (or create) `path` for appending and start the writer
    pub async fn open(path: &str) -> Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open event log {}", path))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<GameEvent>();
        let task = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some(event) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &event).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    eprintln!("[Runtime] event log write failed, logging stopped");
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Ok(Self { tx, task })
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<GameEvent> {
        self.tx.clone()
    }

    pub fn record(&self, event: GameEvent) {
        let _ = self.tx.send(event);
    }

    /// Wait for the writer to drain once every sender is gone
    pub async fn close(self) -> Result<()> {
        drop(self.tx);
        self.task.await.context("event log writer panicked")?;
        Ok(())
    }
}
