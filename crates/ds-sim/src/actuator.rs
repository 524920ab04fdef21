//! Line-oriented link to the physical door model.
//!
//! # Protocol
//!
//! ```text
//! actuator → host   "Doors are ready"             once, after the link opens
//! actuator → host   "<int> <int> ..."             status report, once per step
//! host → actuator   "<motion...> <duration_ms>"   command, once per step
//! ```
//!
//! Each command carries one integer per door in configured order (revolving:
//! positions rotated, swinging: opening angle in whole degrees) followed by
//! the milliseconds until the next step, so the hardware can spread the
//! motion over the step.  The host waits for a report before every step and
//! gives up on the run if none arrives in time.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::record::StepRecord;
use crate::{ActuatorError, ActuatorResult};

/// Line the actuator prints once it has booted.
pub const READY_BANNER: &str = "Doors are ready";

/// Integers reported by the actuator each step.
pub type Telemetry = Vec<i64>;

// ── Command ───────────────────────────────────────────────────────────────────

/// One step's instruction to the actuator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub motions:     Vec<i64>,
    pub duration_ms: u64,
}

impl Command {
    /// Derive the command for a finished step with `until_next` left before
    /// the following one.
    pub fn for_step(record: &StepRecord, until_next: Duration) -> Self {
        Self {
            motions:     record.doors.iter().map(|d| d.motion.command_value()).collect(),
            duration_ms: until_next.as_millis() as u64,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.motions {
            write!(f, "{m} ")?;
        }
        writeln!(f, "{}", self.duration_ms)
    }
}

/// Parse a status report line into telemetry integers.
pub fn parse_report(line: &str) -> ActuatorResult<Telemetry> {
    line.split_whitespace()
        .map(|field| field.parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ActuatorError::Malformed(line.trim_end().to_owned()))
}

// ── Actuator ──────────────────────────────────────────────────────────────────

/// Hardware the scheduler keeps in lock-step with the simulation.
#[async_trait]
pub trait Actuator: Send {
    /// Wait at most `timeout` for the next status report.
    async fn read_report(&mut self, timeout: Duration) -> ActuatorResult<Telemetry>;

    /// Send one step's command.
    async fn send_command(&mut self, command: &Command) -> ActuatorResult<()>;
}

// ── LineActuator ──────────────────────────────────────────────────────────────

/// An [`Actuator`] speaking the line protocol over any byte stream.
pub struct LineActuator<R, W> {
    reader: R,
    writer: W,
    line:   String,
}

impl<R, W> LineActuator<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, line: String::new() }
    }

    /// Read one line, `None` on timeout or end of stream.
    async fn next_line(&mut self, timeout: Duration) -> ActuatorResult<Option<&str>> {
        self.line.clear();
        match tokio::time::timeout(timeout, self.reader.read_line(&mut self.line)).await {
            Err(_) | Ok(Ok(0)) => Ok(None),
            Ok(Ok(_)) => Ok(Some(self.line.as_str())),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    /// Discard output until the ready banner, failing after `timeout`.
    pub async fn wait_ready(&mut self, timeout: Duration) -> ActuatorResult<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(tokio::time::Instant::now());
            if left.is_zero() {
                return Err(ActuatorError::NotReady(timeout));
            }
            match self.next_line(left).await? {
                Some(line) if line.starts_with(READY_BANNER) => return Ok(()),
                Some(line) => debug!(line = line.trim_end(), "actuator boot output"),
                None => return Err(ActuatorError::NotReady(timeout)),
            }
        }
    }
}

#[async_trait]
impl<R, W> Actuator for LineActuator<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn read_report(&mut self, timeout: Duration) -> ActuatorResult<Telemetry> {
        match self.next_line(timeout).await? {
            Some(line) => parse_report(line),
            None => Err(ActuatorError::NoReport(timeout)),
        }
    }

    async fn send_command(&mut self, command: &Command) -> ActuatorResult<()> {
        self.writer.write_all(command.to_string().as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Open a character device (e.g. a USB serial port already configured for
/// 9600 baud) and wait for the actuator to announce itself.
pub async fn open_device(
    path:          &Path,
    ready_timeout: Duration,
) -> ActuatorResult<LineActuator<BufReader<File>, File>> {
    let file = OpenOptions::new().read(true).write(true).open(path).await?;
    let writer = file.try_clone().await?;
    let mut actuator = LineActuator::new(BufReader::new(file), writer);
    actuator.wait_ready(ready_timeout).await?;
    info!(device = %path.display(), "actuator ready");
    Ok(actuator)
}
