//! Integration tests driving the plugin through real shell commands.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

use event_executor::{
    Event, EventExecutorPlugin, EventType, ExecError, CommandRunner, Payload, ShellRunner,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn transfer_event() -> Event {
    Event::new(
        EventType::TransferComplete,
        Payload::Map(vec![(
            "mediainfo".to_string(),
            Payload::Map(vec![("title".to_string(), Payload::from("X"))]),
        )]),
    )
}

fn capture_command(out: &Path, expr: &str) -> String {
    format!(r#"printf '%s' "{expr}" > '{}'"#, out.display())
}

#[test]
fn test_event_data_reaches_the_child_as_json() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("envelope.json");

    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": true,
        "command": capture_command(&out, "$MP_EVENT_DATA"),
    }));

    plugin.on_event(Some(&transfer_event()));

    let envelope: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        envelope,
        json!({
            "type": "transfer.complete",
            "data": {"mediainfo": {"title": "X"}},
        })
    );
}

#[test]
fn test_event_time_is_iso_8601() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("time.txt");

    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": true,
        "command": capture_command(&out, "$MP_EVENT_TIME"),
    }));

    plugin.on_event(Some(&transfer_event()));

    let stamp = fs::read_to_string(&out).unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp.trim()).is_ok());
}

#[test]
#[serial]
fn test_parent_environment_passes_through() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("env.txt");

    std::env::set_var("EVENT_EXECUTOR_TEST_VAR", "inherited");

    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": true,
        "command": capture_command(&out, "$EVENT_EXECUTOR_TEST_VAR:$MP_EVENT_TYPE"),
    }));

    plugin.on_event(Some(&transfer_event()));
    std::env::remove_var("EVENT_EXECUTOR_TEST_VAR");

    assert_eq!(fs::read_to_string(&out).unwrap(), "inherited:transfer.complete");
}

#[test]
fn test_filtered_event_runs_no_command() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("filtered.txt");

    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": true,
        "event_type": "transfer.complete",
        "command": capture_command(&out, "ran"),
    }));

    plugin.on_event(Some(&Event::new(EventType::DownloadAdded, Payload::Null)));
    assert!(!out.exists());

    plugin.on_event(Some(&transfer_event()));
    assert!(out.exists());
}

#[test]
fn test_disabled_plugin_runs_no_command() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("disabled.txt");

    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": false,
        "command": capture_command(&out, "ran"),
    }));

    for event_type in EventType::ALL {
        plugin.on_event(Some(&Event::new(*event_type, Payload::Null)));
    }
    assert!(!out.exists());
}

#[test]
fn test_failing_command_does_not_raise() {
    init_logging();
    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": true,
        "command": "exit 1",
    }));

    // Logged as an error, swallowed here.
    plugin.on_event(Some(&transfer_event()));
}

#[test]
fn test_shell_runner_reports_exit_code() {
    let output = ShellRunner
        .run("exit 1", &[], Duration::from_secs(5))
        .unwrap();
    assert_eq!(output.exit_code, Some(1));
    assert!(!output.success());
}

#[test]
fn test_shell_runner_captures_output_streams() {
    let output = ShellRunner
        .run("echo hello; echo oops >&2", &[], Duration::from_secs(5))
        .unwrap();
    assert!(output.success());
    assert_eq!(output.stdout.trim(), "hello");
    assert_eq!(output.stderr.trim(), "oops");
}

#[test]
fn test_shell_runner_enforces_timeout() {
    let started = Instant::now();
    let err = ShellRunner
        .run("sleep 5", &[], Duration::from_secs(1))
        .unwrap_err();

    assert!(matches!(err, ExecError::Timeout { secs: 1 }));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn test_timed_out_event_does_not_raise() {
    init_logging();
    let plugin = EventExecutorPlugin::new();
    plugin.configure(&json!({
        "enabled": true,
        "command": "sleep 5",
        "timeout": 1,
    }));

    let started = Instant::now();
    plugin.on_event(Some(&transfer_event()));
    assert!(started.elapsed() < Duration::from_secs(3));
}
