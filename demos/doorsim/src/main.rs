//! doorsim — headless door simulator.
//!
//! Runs the simulation in real time, recording to the configured recordings
//! directory.  Operator commands are read from stdin, one per line:
//!
//! ```text
//! arrive <door>              one more person waiting at <door>
//! scenario <door> <name>     play scenarios/<name>.txt on <door>
//! report                     print the latest step as JSON
//! quit                       stop after the current step
//! ```
//!
//! With stdin closed (e.g. `/dev/null`) the simulator runs until ctrl-c.
//!
//! Environment:
//! - `DOORSIM_CONFIG`  JSON `SimConfig` (defaults otherwise)
//! - `DOORSIM_DEVICE`  actuator character device, already set to 9600 baud
//! - `RUST_LOG`        tracing filter, default `info`

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ds_core::SimConfig;
use ds_output::{CsvWriter, SimOutputObserver};
use ds_sim::{Scheduler, SimBuilder, SimHandle, open_device};

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::var_os("DOORSIM_CONFIG") else {
        return Ok(SimConfig::default());
    };
    let path = PathBuf::from(path);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── Operator console ──────────────────────────────────────────────────────────

/// Apply one console line.  Returns `false` once the operator asked to quit.
fn command(handle: &SimHandle, line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    let result = match words.as_slice() {
        [] => Ok(()),
        ["arrive", door] => handle.arrive(door),
        ["scenario", door, name] => handle.start_scenario(door, name),
        ["report"] => handle.step_report().map(|report| match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "report serialisation failed"),
        }),
        ["quit"] => return false,
        _ => {
            warn!(line, "unknown command");
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!(error = %e, line, "command rejected");
    }
    true
}

/// Read operator commands until `quit`.  A closed stdin only ends the
/// console; the run carries on until ctrl-c or a halt.
async fn console<R>(handle: SimHandle, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if !command(&handle, &line) || !handle.is_running() {
            return Ok(());
        }
    }
    info!("stdin closed, console disabled");
    std::future::pending::<()>().await;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config()?;
    let handle = SimBuilder::new(config.clone()).build()?;
    info!(
        doors = config.doors.len(),
        step_ms = config.step_duration_ms,
        "simulation built"
    );

    let writer = CsvWriter::create(&config.recording_dir)?;
    let mut scheduler = Scheduler::new(handle.clone(), SimOutputObserver::new(writer));
    if let Some(device) = std::env::var_os("DOORSIM_DEVICE") {
        let device = PathBuf::from(device);
        let actuator = open_device(&device, config.ready_timeout())
            .await
            .with_context(|| format!("connecting actuator {}", device.display()))?;
        scheduler = scheduler.with_actuator(Box::new(actuator));
    }
    let mut task = scheduler.spawn();

    let ended = tokio::select! {
        result = console(handle.clone(), BufReader::new(tokio::io::stdin())) => { result?; None }
        _ = tokio::signal::ctrl_c() => { info!("interrupted"); None }
        result = &mut task => Some(result),
    };
    handle.shutdown();

    let result = match ended {
        Some(result) => result,
        None => task.await,
    };
    let mut observer = result.context("scheduler task")??;
    info!(state = ?handle.run_state(), "done");
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing recordings");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
