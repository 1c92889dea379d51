//! End-to-end playback scenarios driven by a fake clock.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use cycloid::curve::{parameter_sweep, sample_frame, ColorToken, CurveParameters, TOTAL_FRAMES};
use cycloid::playback::{Phase, PlaybackController, PlaybackState, ToggleMode};
use cycloid::CycloidError;

fn params() -> CurveParameters {
    CurveParameters::new(1.0, ColorToken::parse("#0000FF").unwrap(), 60.0).unwrap()
}

/// Drive the controller until it stops, returning every prefix length it asked for.
fn run_to_end(ctl: &mut PlaybackController, params: &CurveParameters, mut now: Instant) -> Vec<usize> {
    let mut drawn = Vec::new();
    let step = params.frame_delay().unwrap() + Duration::from_millis(1);
    while ctl.state().is_playing {
        if let Some(request) = ctl.poll(params, now) {
            drawn.push(request.prefix_len);
        }
        now += step;
    }
    drawn
}

#[test]
fn test_full_run_draws_every_frame_once() {
    let mut ctl = PlaybackController::default();
    let p = params();
    let now = Instant::now();
    ctl.toggle(&p, now).unwrap();

    let drawn = run_to_end(&mut ctl, &p, now);
    assert_eq!(drawn, (1..=TOTAL_FRAMES).collect::<Vec<_>>());
    assert_eq!(ctl.phase(), Phase::Completed);
    assert_eq!(ctl.state(), PlaybackState { current_frame: TOTAL_FRAMES, is_playing: false });
}

#[test]
fn test_frame_index_never_decreases_while_playing() {
    let mut ctl = PlaybackController::default();
    let p = params();
    let mut now = Instant::now();
    ctl.toggle(&p, now).unwrap();

    let mut last = ctl.state().current_frame;
    while ctl.state().is_playing {
        ctl.poll(&p, now);
        let frame = ctl.state().current_frame;
        assert!(frame >= last);
        last = frame;
        // Irregular wake-ups, some before the frame is due
        now += Duration::from_millis(3 + (frame as u64 % 7) * 4);
    }
    assert_eq!(last, TOTAL_FRAMES);
}

#[test]
fn test_last_frame_is_back_on_the_baseline() {
    let mut ctl = PlaybackController::default();
    let p = params();
    let now = Instant::now();
    ctl.toggle(&p, now).unwrap();
    let last = *run_to_end(&mut ctl, &p, now).last().unwrap();

    let sweep = parameter_sweep(TOTAL_FRAMES);
    let geometry = sample_frame(&sweep[..last], p.radius).unwrap();
    let (x, y) = geometry.trace_point;
    assert!((x - 4.0 * PI).abs() < 1e-9);
    assert!(y.abs() < 1e-9);
}

#[test]
fn test_play_then_pause_before_any_tick_is_a_no_op() {
    let mut ctl = PlaybackController::default();
    let p = params();
    let now = Instant::now();
    ctl.toggle(&p, now).unwrap();
    let state = ctl.toggle(&p, now).unwrap();
    assert_eq!(state, PlaybackState { current_frame: 0, is_playing: false });
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn test_toggle_always_rewinds_in_restart_mode() {
    let p = params();
    for stop_after in [0usize, 1, 37, 99, 100] {
        let mut ctl = PlaybackController::default();
        let mut now = Instant::now();
        ctl.toggle(&p, now).unwrap();
        for _ in 0..stop_after {
            ctl.poll(&p, now);
            now += Duration::from_millis(20);
        }
        let state = ctl.toggle(&p, now).unwrap();
        assert_eq!(state.current_frame, 0, "after {} frames", stop_after);
    }
}

#[test]
fn test_resume_mode_continues_where_it_paused() {
    let mut ctl = PlaybackController::new(TOTAL_FRAMES, ToggleMode::Resume);
    let p = params();
    let mut now = Instant::now();
    ctl.toggle(&p, now).unwrap();
    for _ in 0..40 {
        ctl.poll(&p, now);
        now += Duration::from_millis(20);
    }
    ctl.toggle(&p, now).unwrap();
    assert_eq!(ctl.phase(), Phase::Paused);

    // Time passing while paused changes nothing
    now += Duration::from_secs(5);
    assert!(ctl.poll(&p, now).is_none());

    ctl.toggle(&p, now).unwrap();
    let drawn = run_to_end(&mut ctl, &p, now);
    assert_eq!(drawn.first(), Some(&41));
    assert_eq!(drawn.len(), TOTAL_FRAMES - 40);
}

#[test]
fn test_invalid_speed_is_rejected_before_playback() {
    let mut ctl = PlaybackController::default();
    let bad = CurveParameters { fps: -5.0, ..params() };
    let err = ctl.toggle(&bad, Instant::now()).unwrap_err();
    assert!(matches!(err, CycloidError::Configuration(_)));
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn test_speed_change_applies_to_next_delay() {
    let mut ctl = PlaybackController::default();
    let slow = CurveParameters { fps: 30.0, ..params() };
    let fast = CurveParameters { fps: 100.0, ..params() };
    let now = Instant::now();
    ctl.toggle(&slow, now).unwrap();
    ctl.poll(&slow, now).unwrap();
    assert!(ctl.poll(&fast, now + Duration::from_millis(15)).is_none());

    let later = now + Duration::from_millis(34);
    ctl.poll(&fast, later).unwrap();
    assert_eq!(ctl.time_until_due(later), Some(Duration::from_millis(10)));
}
