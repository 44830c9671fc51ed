//! Runtime tests - session lifecycle, automatic descent and the event log

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use blockfall::core::GameConfig;
use blockfall::runtime::{RuntimeConfig, Session};
use blockfall::types::GameAction;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotView {
    board: Vec<Vec<serde_json::Value>>,
    score: u32,
    level: u32,
    lives: u32,
    paused: bool,
    game_over: bool,
    fall_interval_ms: Option<u32>,
    active: ActiveView,
}

#[derive(Debug, Deserialize)]
struct ActiveView {
    kind: String,
    x: i32,
    y: i32,
}

fn unique_log_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("blockfall_runtime_test_{nanos}.jsonl"))
}

fn config_with_seed(seed: u32) -> RuntimeConfig {
    RuntimeConfig {
        game: GameConfig {
            seed,
            ..GameConfig::default()
        },
        log_path: None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_descends_automatically() {
    let session = Session::start(config_with_seed(5)).await.unwrap();
    let handle = session.handle();

    let start_y = handle.snapshot().await.active.y;
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(handle.snapshot().await.active.y, start_y + 3);

    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_session_pause_stops_descent() {
    let session = Session::start(config_with_seed(5)).await.unwrap();
    let handle = session.handle();

    assert!(handle.apply_action(GameAction::Pause).await);
    let paused_y = handle.snapshot().await.active.y;
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(handle.snapshot().await.active.y, paused_y);

    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_game_plays_itself_to_game_over() {
    let session = Session::start(config_with_seed(9)).await.unwrap();
    let handle = session.handle();

    // 20 rows at 1s per row: a few minutes of pieces stacking in the middle
    tokio::time::sleep(Duration::from_secs(60 * 60)).await;
    let snap = handle.snapshot().await;
    assert!(snap.game_over);
    assert_eq!(snap.lives, 0);
    assert_eq!(snap.fall_interval_ms, None);

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_snapshot_json_shape() {
    let session = Session::start(config_with_seed(3)).await.unwrap();

    let snapshot = session.handle().snapshot().await;
    let json = serde_json::to_string(&snapshot).unwrap();
    let view: SnapshotView = serde_json::from_str(&json).unwrap();

    assert_eq!(view.board.len(), 20);
    assert!(view.board.iter().all(|row| row.len() == 10));
    assert_eq!(view.score, 0);
    assert_eq!(view.level, 1);
    assert_eq!(view.lives, 3);
    assert!(!view.paused);
    assert!(!view.game_over);
    assert_eq!(view.fall_interval_ms, Some(1000));
    assert_eq!(view.active.y, 0);
    assert!(["i", "j", "l", "o", "s", "t", "z"].contains(&view.active.kind.as_str()));
    assert!((3..=4).contains(&view.active.x));

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_event_log_records_session() {
    let path = unique_log_path();
    let config = RuntimeConfig {
        log_path: Some(path.to_string_lossy().into_owned()),
        ..config_with_seed(11)
    };

    let session = Session::start(config).await.unwrap();
    let handle = session.handle();
    handle.apply_action(GameAction::HardDrop).await;
    handle.apply_action(GameAction::Pause).await;
    handle.apply_action(GameAction::Pause).await;
    handle.apply_action(GameAction::Restart).await;
    session.shutdown().await.unwrap();

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    let kinds: Vec<String> = text
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["event"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["pieceLocked", "paused", "resumed", "reset"]);

    let _ = tokio::fs::remove_file(&path).await;
}

#[test]
fn test_session_start_fails_for_unwritable_log() {
    let config = RuntimeConfig {
        log_path: Some(
            std::env::temp_dir()
                .join("blockfall_missing_dir")
                .join("log.jsonl")
                .to_string_lossy()
                .into_owned(),
        ),
        ..RuntimeConfig::default()
    };
    let rt = tokio::runtime::Runtime::new().unwrap();
    assert!(rt.block_on(Session::start(config)).is_err());
}
