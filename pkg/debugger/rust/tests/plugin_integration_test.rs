// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::indexing_slicing)]

use std::fs;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use serde_json::Value;
use tempfile::TempDir;

const PLUGIN_BIN: &str = env!("CARGO_BIN_EXE_scope-debugger");

struct RunningPlugin {
    child: Child,
    socket_path: PathBuf,
    _temp_dir: TempDir,
}

impl RunningPlugin {
    fn start() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // Nested so that the plugin has to create the directory itself
        let socket_path = temp_dir
            .path()
            .join("plugins")
            .join("scope-debugger")
            .join("scope-debugger.sock");

        let child = Command::new(PLUGIN_BIN)
            .arg("--socket")
            .arg(&socket_path)
            .stdout(Stdio::null())
            .spawn()
            .expect("Failed to spawn scope-debugger");

        wait_for(&socket_path, true);

        RunningPlugin {
            child,
            socket_path,
            _temp_dir: temp_dir,
        }
    }

    fn interrupt(&mut self) -> std::process::ExitStatus {
        signal::kill(Pid::from_raw(self.child.id() as i32), Signal::SIGINT)
            .expect("Failed to send SIGINT");
        self.child.wait().expect("Failed to wait on child")
    }
}

impl Drop for RunningPlugin {
    fn drop(&mut self) {
        self.child.kill().ok();
        self.child.wait().ok();
    }
}

fn wait_for(path: &Path, exists: bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while path.exists() != exists {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {} to {}",
            path.display(),
            if exists { "appear" } else { "disappear" }
        );
        thread::sleep(Duration::from_millis(20));
    }
}

/// Sends one HTTP/1.1 request over the plugin socket and returns the status
/// code and body.
fn http(socket: &Path, method: &str, path: &str, body: &str) -> (u16, String) {
    let mut stream = UnixStream::connect(socket).expect("Failed to connect to plugin socket");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();

    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("malformed HTTP response");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("missing status code");
    (status, body.to_string())
}

#[test]
fn test_report_on_fresh_plugin() {
    let plugin = RunningPlugin::start();

    let (status, body) = http(&plugin.socket_path, "GET", "/report", "");
    assert_eq!(status, 200);

    let report: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["Plugins"][0]["id"], "scope-debugger");
    assert_eq!(report["Process"]["controls"]["debugger-gdb"]["rank"], 24);
    assert_eq!(
        report["Process"]["controls"]["debugger-gdb"],
        report["Container"]["controls"]["debugger-gdb"]
    );

    let (_, again) = http(&plugin.socket_path, "GET", "/report", "");
    assert_eq!(body, again, "report should be byte-identical across calls");
}

#[test]
fn test_control_with_unknown_id() {
    let plugin = RunningPlugin::start();

    let (status, body) = http(
        &plugin.socket_path,
        "POST",
        "/control",
        r#"{"AppID":"app","NodeID":"host;1","Control":"debugger-unknown"}"#,
    );
    assert_eq!(status, 200);

    let response: Value = serde_json::from_str(&body).unwrap();
    let error = response["error"].as_str().unwrap();
    assert!(!error.is_empty());
}

#[test]
fn test_socket_removed_on_sigint() {
    let mut plugin = RunningPlugin::start();
    let socket_path = plugin.socket_path.clone();

    let status = plugin.interrupt();
    assert_eq!(status.code(), Some(0), "plugin should exit cleanly");
    assert!(
        !socket_path.exists(),
        "socket file should be removed on SIGINT"
    );
}

#[test]
fn test_stale_socket_is_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let socket_path = temp_dir.path().join("scope-debugger.sock");
    fs::write(&socket_path, "stale").unwrap();

    let mut child = Command::new(PLUGIN_BIN)
        .arg("--socket")
        .arg(&socket_path)
        .stdout(Stdio::null())
        .spawn()
        .expect("Failed to spawn scope-debugger");

    let deadline = Instant::now() + Duration::from_secs(5);
    while UnixStream::connect(&socket_path).is_err() {
        assert!(Instant::now() < deadline, "plugin never started listening");
        thread::sleep(Duration::from_millis(20));
    }

    let (status, _) = http(&socket_path, "GET", "/report", "");
    assert_eq!(status, 200);

    child.kill().ok();
    child.wait().ok();
}

#[test]
fn test_exits_non_zero_when_directory_cannot_be_created() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-directory");
    fs::write(&blocker, "").unwrap();
    let socket_path = blocker.join("scope-debugger.sock");

    let output = Command::new(PLUGIN_BIN)
        .arg("--socket")
        .arg(&socket_path)
        .output()
        .expect("Failed to execute scope-debugger");

    assert!(!output.status.success(), "startup should fail");
    assert!(!socket_path.exists(), "no socket should be bound");
}
