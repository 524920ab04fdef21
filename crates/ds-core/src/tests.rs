//! Unit tests for ds-core primitives.

#[cfg(test)]
mod angle {
    use std::f64::consts::{PI, TAU};

    use crate::angle::{close_to, normalize, to_whole_degrees};

    #[test]
    fn zero_is_close_to_itself() {
        assert!(close_to(0.0, 0.0, PI / 16.0));
    }

    #[test]
    fn angle_is_close_to_itself_for_any_tolerance() {
        for &a in &[0.0, 1.0, PI, 5.5, TAU - 0.01] {
            assert!(close_to(a, a, 0.0), "{a} with zero tolerance");
            assert!(close_to(a, a, PI / 16.0), "{a} with small tolerance");
        }
    }

    #[test]
    fn one_is_not_close_to_zero() {
        assert!(!close_to(1.0, 0.0, PI / 16.0));
    }

    #[test]
    fn half_of_tolerance_is_still_close() {
        assert!(close_to(PI / 32.0, 0.0, PI / 16.0));
    }

    #[test]
    fn window_straddling_zero() {
        // Almost a full circle is almost zero.
        assert!(close_to(TAU - PI / 32.0, 0.0, PI / 16.0));
        assert!(!close_to(TAU - PI / 4.0, 0.0, PI / 16.0));
    }

    #[test]
    fn symmetric_under_full_turn() {
        for &(a, b) in &[(0.1, 0.0), (3.0, 3.1), (6.2, 0.05)] {
            let t = 0.2;
            assert_eq!(close_to(a, b, t), close_to(a, b + TAU, t), "a={a} b={b}");
        }
    }

    #[test]
    fn window_edges_are_exclusive() {
        assert!(!close_to(PI / 8.0, 0.0, PI / 8.0));
        assert!(!close_to(TAU - PI / 8.0, 0.0, PI / 8.0));
        assert!(close_to(PI / 8.0 - 1e-9, 0.0, PI / 8.0));
    }

    #[test]
    fn huge_tolerance_covers_circle() {
        assert!(close_to(PI, 0.0, PI));
    }

    #[test]
    fn normalize_wraps() {
        assert_eq!(normalize(TAU), 0.0);
        assert!((normalize(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn whole_degrees_truncate() {
        assert_eq!(to_whole_degrees(PI / 2.0), 90);
        assert_eq!(to_whole_degrees(PI / 2.0 / 8.0 * 7.0), 78); // 78.75
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{Delay, Step, StepClock};

    #[test]
    fn step_arithmetic() {
        let s = Step(10);
        assert_eq!(s + 5, Step(15));
        assert_eq!(Step(3).to_string(), "S3");
    }

    #[test]
    fn due_is_linear_in_step() {
        let clock = StepClock::new(Duration::from_millis(625));
        assert_eq!(clock.due(Step(0)), Duration::ZERO);
        assert_eq!(clock.due(Step(1)), Duration::from_millis(625));
        assert_eq!(clock.due(Step(1_000)), Duration::from_millis(625_000));
    }

    #[test]
    fn delay_is_due_minus_elapsed() {
        let clock = StepClock::new(Duration::from_millis(500));
        assert_eq!(
            clock.delay_until(Step(3), Duration::from_millis(1_200)),
            Delay::Wait(Duration::from_millis(300))
        );
        assert_eq!(
            clock.delay_until(Step(3), Duration::from_millis(1_700)),
            Delay::Late(Duration::from_millis(200))
        );
    }

    #[test]
    fn exactly_due_counts_as_late() {
        let clock = StepClock::new(Duration::from_millis(500));
        let d = clock.delay_until(Step(2), Duration::from_millis(1_000));
        assert!(d.is_late());
        assert_eq!(d.remaining(), Duration::ZERO);
    }

    #[test]
    fn jitter_does_not_accumulate() {
        // Each iteration runs 7 ms late; the next wait shrinks to absorb it,
        // so the due instants stay on the grid.
        let d = Duration::from_millis(100);
        let mut clock = StepClock::new(d);
        let mut elapsed = Duration::ZERO;
        for _ in 0..50 {
            elapsed += Duration::from_millis(7); // work done in the step
            clock.advance();
            let wait = clock.delay_to_next(elapsed).remaining();
            elapsed += wait;
            assert_eq!(elapsed, clock.due(clock.current_step));
        }
        assert_eq!(elapsed, d * 50);
    }

    #[test]
    fn signed_seconds() {
        assert_eq!(Delay::Wait(Duration::from_millis(250)).as_secs_f64(), 0.25);
        assert_eq!(Delay::Late(Duration::from_millis(250)).as_secs_f64(), -0.25);
    }
}

#[cfg(test)]
mod ids {
    use crate::DoorId;

    #[test]
    fn index_and_sentinel() {
        assert_eq!(DoorId(3).index(), 3);
        assert_eq!(DoorId::INVALID.0, u16::MAX);
        assert_eq!(DoorId::default(), DoorId::INVALID);
        assert_eq!(DoorId::try_from(2usize).unwrap(), DoorId(2));
        assert!(DoorId::try_from(70_000usize).is_err());
        assert_eq!(DoorId(1).to_string(), "DoorId(1)");
    }
}

#[cfg(test)]
mod config {
    use crate::{DoorKind, DoorSpec, SimConfig};

    #[test]
    fn default_is_valid() {
        let cfg = SimConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.doors.len(), 2);
        assert_eq!(cfg.doors[0].name, "revolver");
    }

    #[test]
    fn report_timeout_must_be_shorter_than_step() {
        let cfg = SimConfig { report_timeout_ms: 625, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_step_duration_rejected() {
        let cfg = SimConfig { step_duration_ms: 0, report_timeout_ms: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn duplicate_door_names_rejected() {
        let cfg = SimConfig {
            doors: vec![DoorSpec::revolving("a", 16, 1), DoorSpec::swinging("a", 8, 7)],
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn no_doors_rejected() {
        let cfg = SimConfig { doors: vec![], ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn json_with_partial_fields() {
        let cfg: SimConfig = serde_json::from_str(
            r#"{
                "step_duration_ms": 1000,
                "doors": [
                    { "name": "main", "kind": "revolving", "granularity": 32, "tolerance": 2 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.step_duration_ms, 1000);
        assert_eq!(cfg.report_timeout_ms, 200);
        assert_eq!(cfg.doors[0].kind, DoorKind::Revolving { granularity: 32, tolerance: 2 });
        cfg.validate().unwrap();
    }
}
