//! Unit tests for ds-scenario.

use ds_core::Step;

use crate::{Scenario, ScenarioError, ScenarioLibrary, ScenarioPlayer, parse_scenario};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scenario(arrivals: &[u32]) -> Scenario {
    Scenario { arrivals: arrivals.to_vec(), ..Scenario::default() }
}

// ── Parser ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod parser {
    use super::*;

    #[test]
    fn three_sections() {
        let s = parse_scenario("Rush hour\n\nLots of people\nall at once\n\n1\n0\n3\n").unwrap();
        assert_eq!(s.title, "Rush hour");
        assert_eq!(s.description, "Lots of people all at once");
        assert_eq!(s.arrivals, vec![1, 0, 3]);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let s = parse_scenario("\n\n  Quiet  \n\n   nobody much \n\n 0 \n\t1\n\n\n").unwrap();
        assert_eq!(s.title, "Quiet");
        assert_eq!(s.description, "nobody much");
        assert_eq!(s.arrivals, vec![0, 1]);
    }

    #[test]
    fn blank_lines_inside_arrivals_are_skipped() {
        let s = parse_scenario("T\n\nD\n\n1\n\n2\n").unwrap();
        assert_eq!(s.arrivals, vec![1, 2]);
    }

    #[test]
    fn empty_description() {
        let s = parse_scenario("T\n\n\n4\n").unwrap();
        assert_eq!(s.description, "");
        assert_eq!(s.arrivals, vec![4]);
    }

    #[test]
    fn non_integer_line_is_an_error() {
        let err = parse_scenario("T\n\nD\n\n1\ntwo\n").unwrap_err();
        match err {
            ScenarioError::Parse { line, text } => {
                assert_eq!(line, 6);
                assert_eq!(text, "two");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_count_is_an_error() {
        assert!(matches!(parse_scenario("T\n\nD\n\n-1\n"), Err(ScenarioError::Parse { .. })));
    }

    #[test]
    fn missing_arrivals_is_an_error() {
        assert!(matches!(parse_scenario("T\n\nD\n"), Err(ScenarioError::Empty)));
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod player {
    use super::*;

    #[test]
    fn idle_player_yields_nobody() {
        let mut p = ScenarioPlayer::idle();
        for t in 0..5 {
            assert_eq!(p.arrivals_at(Step(t)), (0, None));
        }
        assert_eq!(p.name(), None);
    }

    #[test]
    fn cyclic_index() {
        let p = ScenarioPlayer::starting_at("s", vec![1, 2, 3], Step(10)).unwrap();
        for k in 0..20u64 {
            assert_eq!(p.index_at(Step(10 + k)), (k % 3) as usize);
        }
    }

    #[test]
    fn replays_cyclically() {
        let mut p = ScenarioPlayer::starting_at("s", vec![1, 0, 2], Step(0)).unwrap();
        let seen: Vec<u32> = (0..7).map(|t| p.arrivals_at(Step(t)).0).collect();
        assert_eq!(seen, vec![1, 0, 2, 1, 0, 2, 1]);
    }

    #[test]
    fn queued_scenario_waits_for_cycle_boundary() {
        let mut p = ScenarioPlayer::starting_at("old", vec![1, 1, 1], Step(0)).unwrap();
        assert_eq!(p.arrivals_at(Step(0)).0, 1);
        p.queue("new", scenario(&[5, 6])).unwrap();

        // Steps 1 and 2 finish the old cycle.
        assert_eq!(p.arrivals_at(Step(1)), (1, None));
        assert_eq!(p.arrivals_at(Step(2)), (1, None));
        assert!(p.pending().is_some());

        let (n, switch) = p.arrivals_at(Step(3));
        assert_eq!(n, 5);
        let switch = switch.unwrap();
        assert_eq!(switch.name, "new");
        assert_eq!(switch.step, Step(3));
        assert_eq!(p.name(), Some("new"));
        assert_eq!(p.started(), Step(3));
        assert!(p.pending().is_none());

        assert_eq!(p.arrivals_at(Step(4)), (6, None));
        assert_eq!(p.arrivals_at(Step(5)), (5, None));
    }

    #[test]
    fn idle_player_switches_on_next_step() {
        let mut p = ScenarioPlayer::idle();
        p.queue("go", scenario(&[2])).unwrap();
        let (n, switch) = p.arrivals_at(Step(17));
        assert_eq!(n, 2);
        assert_eq!(switch.unwrap().step, Step(17));
    }

    #[test]
    fn later_queue_replaces_earlier() {
        let mut p = ScenarioPlayer::starting_at("old", vec![0, 0], Step(0)).unwrap();
        p.arrivals_at(Step(0));
        p.queue("a", scenario(&[1])).unwrap();
        p.queue("b", scenario(&[2])).unwrap();
        p.arrivals_at(Step(1));
        let (n, switch) = p.arrivals_at(Step(2));
        assert_eq!(n, 2);
        assert_eq!(switch.unwrap().name, "b");
    }

    #[test]
    fn empty_scenarios_rejected() {
        assert!(ScenarioPlayer::starting_at("x", vec![], Step(0)).is_err());
        let mut p = ScenarioPlayer::idle();
        assert!(p.queue("x", scenario(&[])).is_err());
    }
}

// ── Library ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod library {
    use super::*;

    #[test]
    fn loads_by_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("rush.txt"), "Rush\n\nBusy\n\n2\n0\n").unwrap();
        let lib = ScenarioLibrary::new(dir.path());
        let s = lib.load("rush").unwrap();
        assert_eq!(s.title, "Rush");
        assert_eq!(s.arrivals, vec![2, 0]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let lib = ScenarioLibrary::new(dir.path());
        assert!(matches!(lib.load("nope"), Err(ScenarioError::Read { .. })));
    }

    #[test]
    fn path_escapes_rejected() {
        let lib = ScenarioLibrary::new("scenarios");
        for bad in ["", ".", "..", "../etc/passwd", "a/b", "a\\b"] {
            assert!(
                matches!(lib.path_for(bad), Err(ScenarioError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(
            lib.path_for("morning").unwrap(),
            std::path::Path::new("scenarios").join("morning.txt")
        );
    }
}
