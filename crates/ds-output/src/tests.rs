//! Tests for ds-output.

#[cfg(test)]
mod csv_tests {
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    use ds_core::Step;
    use ds_sim::{ResultRow, ScenarioRow, UnderrunRow};

    use crate::csv::{CsvWriter, recording_stamp};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect()
    }

    #[test]
    fn stamp_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 17, 14, 5, 9).unwrap();
        assert_eq!(recording_stamp(at), "031714-0509");
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let w = CsvWriter::new(&dir.path().join("recordings"), "010203-0405").unwrap();
        assert!(dir.path().join("recordings/010203-0405.csv").exists());
        assert!(dir.path().join("recordings/010203-0405-scenarios.csv").exists());
        assert_eq!(w.path(), dir.path().join("recordings/010203-0405.csv"));
    }

    #[test]
    fn result_rows_without_header() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), "run").unwrap();
        w.write_result(&ResultRow { elapsed_secs: 0.0, arrivals: vec![0, 1], telemetry: vec![] })
            .unwrap();
        w.write_result(&ResultRow {
            elapsed_secs: 0.625,
            arrivals:     vec![2, 0],
            telemetry:    vec![30, 33, 90, 96],
        })
        .unwrap();

        // Flushed per row: readable before finish.
        let rows = read_rows(&dir.path().join("run.csv"));
        assert_eq!(rows, vec![
            vec!["0", "0", "1"],
            vec!["0.625", "2", "0", "30", "33", "90", "96"],
        ]);
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn scenario_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), "run").unwrap();
        w.write_scenario(&ScenarioRow {
            elapsed_secs: 1.25,
            door:         "swinger".into(),
            scenario:     "rush hour".into(),
        })
        .unwrap();

        let rows = read_rows(&dir.path().join("run-scenarios.csv"));
        assert_eq!(rows, vec![vec!["1.25", "swinger", "rush hour"]]);
        assert!(read_rows(&dir.path().join("run.csv")).is_empty());
    }

    #[test]
    fn underruns_append_to_errors_file() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), "run").unwrap();
        assert!(!w.errors_path().exists(), "no file until a step runs late");

        w.write_underrun(&UnderrunRow { elapsed_secs: 1.0, step: Step(1), late_secs: 0.375 })
            .unwrap();
        w.write_underrun(&UnderrunRow { elapsed_secs: 2.0, step: Step(2), late_secs: 0.75 })
            .unwrap();
        w.finish().unwrap();

        let text = std::fs::read_to_string(dir.path().join("run-errors.txt")).unwrap();
        assert_eq!(text, "1: step 1 late by 0.375 s\n2: step 2 late by 0.75 s\n");
    }
}

#[cfg(test)]
mod observer_tests {
    use std::time::Duration;

    use ds_core::{SimConfig, Step};
    use ds_scenario::Scenario;
    use ds_sim::{
        ResultRow, ScenarioRow, Scheduler, SimBuilder, SimObserver, StepRecord, UnderrunRow,
    };

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Writer whose every call fails, counting attempts.
    #[derive(Default)]
    struct Broken {
        attempts: usize,
    }

    impl OutputWriter for Broken {
        fn write_result(&mut self, _row: &ResultRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn write_scenario(&mut self, _row: &ScenarioRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("gone")))
        }
        fn write_underrun(&mut self, _row: &UnderrunRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("read-only")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_and_keeps_going() {
        let mut obs = SimOutputObserver::new(Broken::default());
        let record = StepRecord { step: Step(0), doors: vec![] };
        let row = ResultRow { elapsed_secs: 0.0, arrivals: vec![], telemetry: vec![] };
        obs.on_step(&record, &row);
        obs.on_scenario_switch(&ScenarioRow {
            elapsed_secs: 0.0,
            door:         "d".into(),
            scenario:     "s".into(),
        });
        obs.on_underrun(&UnderrunRow { elapsed_secs: 1.0, step: Step(1), late_secs: 0.5 });
        obs.on_sim_end(Step(1));

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn write_error_survives_the_run() {
        let handle = SimBuilder::new(SimConfig::default()).build().unwrap();
        let task = Scheduler::new(handle.clone(), SimOutputObserver::new(Broken::default())).spawn();

        tokio::time::sleep(Duration::from_millis(700)).await;
        handle.shutdown();
        let mut obs = task.await.unwrap().unwrap();

        assert!(obs.take_error().is_some_and(|e| e.to_string().contains("disk full")));
        assert_eq!(obs.into_writer().attempts, 2, "the run kept stepping after the failure");
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_run_is_recorded() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let handle = SimBuilder::new(SimConfig::default())
            .scenario("swinger", "pairs", Scenario { arrivals: vec![2, 0], ..Scenario::default() })
            .build()
            .unwrap();
        let writer = CsvWriter::new(dir.path(), "run").unwrap();
        let task = Scheduler::new(handle.clone(), SimOutputObserver::new(writer)).spawn();

        tokio::time::sleep(Duration::from_millis(1_300)).await;
        handle.shutdown();
        task.await.unwrap().unwrap();

        let results = std::fs::read_to_string(dir.path().join("run.csv")).unwrap();
        assert_eq!(results, "0,0,2\n0.625,0,0\n1.25,0,2\n");
        let scenarios = std::fs::read_to_string(dir.path().join("run-scenarios.csv")).unwrap();
        assert_eq!(scenarios, "0,swinger,pairs\n");
    }
}
