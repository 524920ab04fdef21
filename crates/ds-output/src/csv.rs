//! CSV output backend.
//!
//! Creates two header-less files in the recordings directory, both named
//! from the run's start time:
//! - `<stamp>.csv`
//! - `<stamp>-scenarios.csv`
//!
//! Timing underruns go to `<stamp>-errors.txt`, opened on the first one.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{Writer, WriterBuilder};
use tracing::info;

use ds_sim::{ResultRow, ScenarioRow, UnderrunRow};

use crate::writer::OutputWriter;
use crate::OutputResult;

/// File stem for a recording started at `at`, e.g. `031714-0509`.
pub fn recording_stamp(at: DateTime<Local>) -> String {
    at.format("%m%d%H-%M%S").to_string()
}

/// Writes the result and scenario logs to two CSV files, flushing after
/// every row so a crash loses at most the step in progress.
pub struct CsvWriter {
    results:     Writer<File>,
    scenarios:   Writer<File>,
    errors:      Option<File>,
    errors_path: PathBuf,
    path:        PathBuf,
    finished:    bool,
}

impl CsvWriter {
    /// Open `<dir>/<stamp>.csv` and `<dir>/<stamp>-scenarios.csv`,
    /// creating `dir` if needed.
    pub fn new(dir: &Path, stamp: &str) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{stamp}.csv"));
        let results = open(&path)?;
        let scenarios = open(&dir.join(format!("{stamp}-scenarios.csv")))?;
        info!(path = %path.display(), "recording results");
        Ok(Self {
            results,
            scenarios,
            errors: None,
            errors_path: dir.join(format!("{stamp}-errors.txt")),
            path,
            finished: false,
        })
    }

    /// [`new`][Self::new] stamped with the current local time.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        Self::new(dir, &recording_stamp(Local::now()))
    }

    /// Path of the result log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the underrun log, which exists only once a step ran late.
    pub fn errors_path(&self) -> &Path {
        &self.errors_path
    }
}

fn open(path: &Path) -> OutputResult<Writer<File>> {
    Ok(WriterBuilder::new().has_headers(false).flexible(true).from_path(path)?)
}

impl OutputWriter for CsvWriter {
    fn write_result(&mut self, row: &ResultRow) -> OutputResult<()> {
        let mut record = Vec::with_capacity(1 + row.arrivals.len() + row.telemetry.len());
        record.push(row.elapsed_secs.to_string());
        record.extend(row.arrivals.iter().map(u32::to_string));
        record.extend(row.telemetry.iter().map(i64::to_string));
        self.results.write_record(&record)?;
        self.results.flush()?;
        Ok(())
    }

    fn write_scenario(&mut self, row: &ScenarioRow) -> OutputResult<()> {
        self.scenarios.write_record([
            row.elapsed_secs.to_string().as_str(),
            row.door.as_str(),
            row.scenario.as_str(),
        ])?;
        self.scenarios.flush()?;
        Ok(())
    }

    fn write_underrun(&mut self, row: &UnderrunRow) -> OutputResult<()> {
        let file = match self.errors.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.errors_path)?,
        };
        let file = self.errors.insert(file);
        writeln!(
            file,
            "{}: step {} late by {} s",
            row.elapsed_secs, row.step.0, row.late_secs
        )?;
        file.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.results.flush()?;
        self.scenarios.flush()?;
        if let Some(file) = self.errors.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}
