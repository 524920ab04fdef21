//! Tests for the operator console.

use std::time::Duration;

use ds_core::SimConfig;
use ds_door::DoorModel;
use ds_sim::{RunState, SimBuilder, SimHandle};

use crate::{command, console};

fn handle() -> SimHandle {
    SimBuilder::new(SimConfig::default()).build().unwrap()
}

#[tokio::test(start_paused = true)]
async fn closed_stdin_keeps_running() {
    let handle = handle();
    let input: &[u8] = b"arrive revolver\n";
    let waited = tokio::time::timeout(Duration::from_secs(60), console(handle.clone(), input)).await;
    assert!(waited.is_err(), "console must not return on end of input");
    assert_eq!(handle.run_state(), RunState::Running);
}

#[tokio::test]
async fn quit_ends_console() {
    let handle = handle();
    let input: &[u8] = b"arrive swinger\nquit\narrive swinger\n";
    console(handle.clone(), input).await.unwrap();
    let arriving = handle.with_state(|s| s.doors()[1].door.snapshot().arriving);
    assert_eq!(arriving, 1, "nothing read after quit");
}

#[test]
fn rejected_commands_keep_console_open() {
    let handle = handle();
    assert!(command(&handle, "arrive lift"));
    assert!(command(&handle, "scenario swinger ../etc"));
    assert!(command(&handle, "dance"));
    assert!(command(&handle, ""));
    assert!(!command(&handle, "quit"));
}
