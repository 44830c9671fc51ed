//! Shell binary tests - stdout carries only snapshot JSON lines

use std::io::Write;
use std::process::{Command, Stdio};

fn run_shell(input: &str) -> (Vec<String>, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_blockfall"))
        .env_remove("BLOCKFALL_LOG_PATH")
        .env_remove("BLOCKFALL_LIVES")
        .env_remove("BLOCKFALL_EMPTY_COLOR")
        .env("BLOCKFALL_SEED", "7")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start shell");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "shell exited with {:?}", output.status);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (stdout.lines().map(str::to_string).collect(), stderr)
}

#[test]
fn test_stdout_is_only_snapshot_json() {
    let (lines, stderr) = run_shell("show\nmoveLeft\nbogus\nquit\n");

    // Initial frame + show + moveLeft; the unknown command prints nothing
    assert_eq!(lines.len(), 3, "stdout: {:?}", lines);
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("non-JSON stdout line {:?}: {}", line, e));
        assert!(value["board"].is_array());
        assert_eq!(value["lives"], 3);
    }

    assert!(stderr.contains("[Runtime] tick driver started"));
    assert!(stderr.contains("[Shell] unknown command: bogus"));
    assert!(stderr.contains("[Runtime] stopped"));
}

#[test]
fn test_theme_command_resets_with_new_empty_color() {
    let (lines, _) = run_shell("hardDrop\ntheme navy\nquit\n");
    assert_eq!(lines.len(), 3);

    let last: serde_json::Value = serde_json::from_str(&lines[2]).unwrap();
    assert_eq!(last["board"][0][0]["color"], "navy");
    assert_eq!(last["board"][19][4]["state"], "empty");
    assert_eq!(last["score"], 0);
}
