//! Integration tests for the prize wheel widget lifecycle.


use prize_wheel::{
    resolve_winner, Canvas, CommandRecorder, FrameOwner, PrizeWheel, Roster, SpinPhase,
    WheelConfig, WheelEvent,
};
use wheel_fixtures::{
    fast_config, fast_wheel, run_frames, run_until_settled, seeded_config, settled_events,
    FRAME_MS,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ==================== Spin Flow ====================

#[test]
fn test_spin_settles_on_resolved_winner() {
    init_logging();
    let labels = ["Ann", "Bob", "Cy", "Dee", "Eve"];
    let mut wheel = fast_wheel(&labels, 11);
    let mut canvas = CommandRecorder::new(550, 550);
    wheel.spin(0.0).unwrap();

    let run = run_until_settled(&mut wheel, Some(&mut canvas), 0.0);
    assert_eq!(run.events.first(), Some(&WheelEvent::SpinStarted));

    let settled = settled_events(&run.events);
    assert_eq!(settled.len(), 1);
    let (index, label, angle) = settled[0].clone();
    assert!((1800.0..2160.0).contains(&angle), "angle {angle}");
    assert_eq!(index, resolve_winner(angle, labels.len()).unwrap());
    assert_eq!(label, labels[index]);

    let result = wheel.result().unwrap();
    assert_eq!(result.index, index);
    assert_eq!(result.label, label);
    assert_eq!(wheel.spin_phase(), SpinPhase::Settled);
    assert!(run.now >= 1000.0);
}

#[test]
fn test_spin_duration_independent_of_frame_rate() {
    let mut slow = fast_wheel(&["A", "B", "C"], 5);
    slow.spin(0.0).unwrap();
    let mut now = 0.0;
    let mut settled_at = None;
    while settled_at.is_none() && now < 5000.0 {
        let events = slow.frame(now, None, None);
        if !settled_events(&events).is_empty() {
            settled_at = Some(now);
        }
        now += 100.0;
    }
    assert_eq!(settled_at, Some(1000.0));

    let mut fast = fast_wheel(&["A", "B", "C"], 5);
    fast.spin(0.0).unwrap();
    let run = run_until_settled(&mut fast, None, 0.0);
    assert!(run.now >= 1000.0 && run.now < 1000.0 + FRAME_MS);
}

#[test]
fn test_settle_fires_exactly_once() {
    let mut wheel = fast_wheel(&["A", "B", "C", "D"], 3);
    wheel.spin(0.0).unwrap();
    let run = run_until_settled(&mut wheel, None, 0.0);

    let later = run_frames(&mut wheel, None, run.now + FRAME_MS, 120, |_, _| false);
    assert_eq!(settled_events(&run.events).len(), 1);
    assert!(settled_events(&later.events).is_empty());
    assert!(!wheel.scheduler().is_pending(FrameOwner::Spin));
}

#[test]
fn test_reentrant_spin_rejected() {
    let mut wheel = fast_wheel(&["A", "B"], 9);
    wheel.spin(0.0).unwrap();
    wheel.frame(0.0, None, None);
    wheel.frame(FRAME_MS, None, None);
    let rotation = wheel.current_rotation();

    let err = wheel.spin(2.0 * FRAME_MS).unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(wheel.scheduler().len(), 1);
    assert_eq!(wheel.current_rotation(), rotation);

    let run = run_until_settled(&mut wheel, None, 2.0 * FRAME_MS);
    assert_eq!(settled_events(&run.events).len(), 1);
}

#[test]
fn test_spin_again_after_settle() {
    let mut wheel = fast_wheel(&["A", "B", "C"], 21);
    wheel.spin(0.0).unwrap();
    let first = run_until_settled(&mut wheel, None, 0.0);

    wheel.spin(first.now).unwrap();
    assert!(wheel.result().is_none());
    assert_eq!(wheel.countdown_remaining(), None);
    let second = run_until_settled(&mut wheel, None, first.now);
    assert_eq!(settled_events(&second.events).len(), 1);
}

// ==================== Mutual Exclusion ====================

#[test]
fn test_idle_and_spin_never_both_scheduled() {
    let mut wheel = fast_wheel(&["A", "B", "C"], 4);
    wheel.start_idle().unwrap();
    let idle = run_frames(&mut wheel, None, 0.0, 30, |w, _| {
        assert!(!w.scheduler().is_pending(FrameOwner::Spin));
        false
    });
    assert!(wheel.is_idle_running());

    wheel.spin(idle.now).unwrap();
    let spin = run_frames(&mut wheel, None, idle.now, 10_000, |w, events| {
        let q = w.scheduler();
        assert!(!(q.is_pending(FrameOwner::Idle) && q.is_pending(FrameOwner::Spin)));
        !settled_events(events).is_empty()
    });
    assert_eq!(settled_events(&spin.events).len(), 1);
    assert!(!wheel.is_idle_running());
}

#[test]
fn test_idle_rotation_advances_each_frame() {
    let mut wheel = fast_wheel(&["A", "B", "C"], 4);
    let mut canvas = CommandRecorder::new(550, 550);
    wheel.start_idle().unwrap();
    run_frames(&mut wheel, Some(&mut canvas), 0.0, 100, |_, _| false);
    assert!((wheel.current_rotation() - 1.0).abs() < 1e-4);
    assert_eq!(canvas.frame_count(), 100);

    wheel.stop_idle();
    wheel.stop_idle();
    assert!(wheel.scheduler().is_empty());
}

// ==================== Result Dialog ====================

#[test]
fn test_close_result_resumes_idle() {
    let mut wheel = fast_wheel(&["A", "B", "C"], 8);
    wheel.spin(0.0).unwrap();
    run_until_settled(&mut wheel, None, 0.0);
    assert!(!wheel.is_idle_running());

    wheel.close_result();
    assert!(wheel.result().is_none());
    assert_eq!(wheel.countdown_remaining(), None);
    assert!(wheel.is_idle_running());
    assert_eq!(wheel.roster().len(), 3);
}

#[test]
fn test_close_result_without_resume() {
    let config = WheelConfig {
        resume_idle_after_dismiss: false,
        ..fast_config(8)
    };
    let mut wheel = PrizeWheel::with_roster(config, Roster::from_labels(["A", "B"]).unwrap());
    wheel.spin(0.0).unwrap();
    run_until_settled(&mut wheel, None, 0.0);
    wheel.close_result();
    assert!(!wheel.is_idle_running());
}

#[test]
fn test_remove_winner_drops_every_duplicate() {
    let mut wheel = fast_wheel(&["Sam", "Sam", "Sam", "Sam"], 13);
    wheel.spin(0.0).unwrap();
    run_until_settled(&mut wheel, None, 0.0);

    assert_eq!(wheel.remove_winner(), 4);
    assert!(wheel.roster().is_empty());
    assert!(wheel.result().is_none());
    assert!(wheel.spin(10_000.0).unwrap_err().is_invalid_state());
}

#[test]
fn test_remove_winner_redraws_smaller_wheel() {
    let mut wheel = fast_wheel(&["Ann", "Bob", "Cy"], 17);
    let mut canvas = CommandRecorder::new(550, 550);
    wheel.spin(0.0).unwrap();
    let run = run_until_settled(&mut wheel, Some(&mut canvas), 0.0);
    let (_, label, _) = settled_events(&run.events)[0].clone();

    assert_eq!(wheel.remove_winner(), 1);
    assert!(!wheel.roster().labels().contains(&label));
    wheel.frame(run.now + FRAME_MS, Some(&mut canvas), None);
    assert_eq!(canvas.last_frame_wedges().len(), 2);
}

#[test]
fn test_dismiss_without_result_is_noop() {
    let mut wheel = fast_wheel(&["A"], 1);
    wheel.close_result();
    assert_eq!(wheel.remove_winner(), 0);
    assert!(!wheel.is_idle_running());
    assert_eq!(wheel.roster().len(), 1);
}

// ==================== Countdown ====================

#[test]
fn test_countdown_runs_after_settle() {
    let mut wheel = fast_wheel(&["A", "B"], 2);
    wheel.spin(0.0).unwrap();
    let run = run_until_settled(&mut wheel, None, 0.0);
    assert_eq!(wheel.countdown_remaining(), Some(3));

    let settle = run.now;
    let mut ticks = Vec::new();
    for second in 1..=4 {
        for event in wheel.frame(settle + second as f64 * 1000.0, None, None) {
            match event {
                WheelEvent::CountdownTick(_) | WheelEvent::CountdownExpired => ticks.push(event),
                _ => {}
            }
        }
    }
    assert_eq!(
        ticks,
        vec![
            WheelEvent::CountdownTick(2),
            WheelEvent::CountdownTick(1),
            WheelEvent::CountdownExpired
        ]
    );
    assert_eq!(wheel.countdown_remaining(), None);
}

#[test]
fn test_spin_clears_countdown() {
    let mut wheel = fast_wheel(&["A", "B"], 2);
    wheel.spin(0.0).unwrap();
    let run = run_until_settled(&mut wheel, None, 0.0);
    assert!(wheel.countdown_remaining().is_some());
    wheel.spin(run.now + 10.0).unwrap();
    assert_eq!(wheel.countdown_remaining(), None);
}

// ==================== Celebration ====================

#[test]
fn test_celebration_window_on_settle() {
    let mut wheel = PrizeWheel::with_roster(
        WheelConfig {
            particle_count: 100,
            ..fast_config(6)
        },
        Roster::from_labels(["A", "B", "C"]).unwrap(),
    );
    let mut overlay = CommandRecorder::new(1320, 580);
    wheel.spin(0.0).unwrap();
    let run = run_until_settled(&mut wheel, None, 0.0);
    assert!(wheel.is_celebrating());
    assert_eq!(wheel.celebration().particles().len(), 100);

    let mut ended = false;
    let mut now = run.now;
    while now < run.now + 1000.0 {
        now += FRAME_MS;
        let events = wheel.frame(now, None, Some(&mut overlay));
        for p in wheel.celebration().particles() {
            assert!(p.y >= 0.0 && p.y <= 580.0);
        }
        if events.contains(&WheelEvent::CelebrationEnded) {
            ended = true;
            assert!(now >= run.now + 300.0);
            break;
        }
    }

    assert!(ended);
    assert!(!wheel.is_celebrating());
    assert!(!wheel.scheduler().is_pending(FrameOwner::Celebration));
    assert!(overlay.frame_count() > 1);
    assert_eq!(overlay.last_frame(), &[prize_wheel::DrawCommand::Clear]);
}

// ==================== Surfaces & Teardown ====================

#[test]
fn test_missing_surface_skips_frames_only() {
    let mut wheel = fast_wheel(&["A", "B", "C"], 31);
    let mut canvas = CommandRecorder::new(550, 550);
    wheel.spin(0.0).unwrap();

    // Surface mounts halfway through the spin.
    let first = run_frames(&mut wheel, None, 0.0, 30, |_, _| false);
    assert!(wheel.is_spinning());
    let rest = run_until_settled(&mut wheel, Some(&mut canvas), first.now + FRAME_MS);
    assert_eq!(settled_events(&rest.events).len(), 1);
    assert_eq!(canvas.frame_count(), rest.frames);
}

#[test]
fn test_teardown_cancels_everything() {
    let mut wheel = fast_wheel(&["A", "B", "C"], 12);
    wheel.spin(0.0).unwrap();
    let run = run_until_settled(&mut wheel, None, 0.0);
    wheel.close_result();
    assert!(!wheel.scheduler().is_empty());

    wheel.teardown();
    assert!(wheel.scheduler().is_empty());
    assert!(!wheel.is_idle_running());
    assert!(!wheel.is_celebrating());
    assert_eq!(wheel.countdown_remaining(), None);
    assert!(wheel.frame(run.now + 5000.0, None, None).is_empty());
}

#[test]
fn test_default_widget_uses_sample_roster() {
    let mut wheel = PrizeWheel::new(seeded_config(1));
    assert_eq!(wheel.roster().len(), 50);
    assert_eq!(wheel.segments().unwrap().len(), 50);
    let mut canvas = CommandRecorder::new(550, 550);
    wheel.render(&mut canvas as &mut dyn Canvas).unwrap();
    assert_eq!(canvas.last_frame_wedges().len(), 50);
}
