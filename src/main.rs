//! Headless blockfall runner (default binary).
//!
//! Reads one command per stdin line and prints the resulting snapshot as one
//! JSON line on stdout. Automatic descent runs in the background.
//!
//! Commands: any action name (`moveLeft`, `rotateCw`, `hardDrop`, `pause`,
//! `restart`, ...), `show`, `theme <color>`, `quit`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use blockfall::runtime::{GameHandle, RuntimeConfig, Session};
use blockfall::types::GameAction;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    let session = Session::start(config).await?;

    let result = run(session.handle()).await;

    // Always stop the driver and flush the log.
    session.shutdown().await?;
    result
}

async fn run(handle: &GameHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    eprintln!("[Shell] ready");
    print_snapshot(handle, &mut stdout).await?;

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "show" => {}
            "theme" => {
                if arg.is_empty() {
                    eprintln!("[Shell] usage: theme <color>");
                    continue;
                }
                handle.reset(Arc::from(arg)).await;
            }
            other => match GameAction::from_str(other) {
                Some(action) => {
                    handle.apply_action(action).await;
                }
                None => {
                    eprintln!("[Shell] unknown command: {}", other);
                    continue;
                }
            },
        }

        print_snapshot(handle, &mut stdout).await?;
    }

    eprintln!("[Shell] bye");
    Ok(())
}

async fn print_snapshot(handle: &GameHandle, stdout: &mut tokio::io::Stdout) -> Result<()> {
    let snapshot = handle.snapshot().await;
    let mut buf = serde_json::to_vec(&snapshot).context("failed to encode snapshot")?;
    buf.push(b'\n');
    stdout.write_all(&buf).await?;
    stdout.flush().await?;
    Ok(())
}
