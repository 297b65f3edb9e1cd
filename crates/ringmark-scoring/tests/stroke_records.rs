//! End-to-end scoring of stroke records through the public API.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use ringmark_scoring::{
    DisplayExtent, DrawingGame, Feedback, ScoringConfig, ScoringError, StrokeRecord, evaluate,
    evaluate_with_config, reference_logo,
};

fn reference_record_json(width: f64, height: f64) -> String {
    let display = DisplayExtent::new(width, height).unwrap();
    let record = StrokeRecord {
        display,
        points: reference_logo(display).into_points(),
    };
    serde_json::to_string(&record).unwrap()
}

#[test]
fn reference_record_round_trips_through_json_and_scores_high() {
    let json = reference_record_json(800.0, 500.0);
    let record = StrokeRecord::from_json(&json).unwrap();
    let e = evaluate(record.stroke().points(), record.display);
    assert!(e.score >= 85, "score {}", e.score);
}

#[test]
fn non_finite_coordinate_is_rejected() {
    let json = r#"{"display":{"width":600,"height":600},"points":[{"x":1,"y":2},{"x":1e999,"y":2}]}"#;
    // serde_json refuses out-of-range literals before validation sees them.
    assert!(matches!(
        StrokeRecord::from_json(json),
        Err(ScoringError::Parse(_))
    ));
}

#[test]
fn partial_config_json_falls_back_to_defaults() {
    let config: ScoringConfig = serde_json::from_str(r#"{"ring":{"threshold":0.9}}"#).unwrap();
    assert!((config.ring.threshold - 0.9).abs() < f64::EPSILON);
    assert_eq!(config.min_points, ScoringConfig::DEFAULT_MIN_POINTS);
    config.validate().unwrap();
}

#[test]
fn stricter_ring_threshold_turns_reference_into_arrow_only() {
    let display = DisplayExtent::new(600.0, 600.0).unwrap();
    let config: ScoringConfig = serde_json::from_str(r#"{"ring":{"threshold":1.0}}"#).unwrap();
    let logo = reference_logo(display);
    let e = evaluate_with_config(logo.points(), display, &config);
    assert_eq!(e.message, Feedback::ArrowOnly.message());
    assert!(e.score <= 60);
}

#[test]
fn game_session_tracks_best_over_attempts() {
    let display = DisplayExtent::new(600.0, 600.0).unwrap();
    let mut game = DrawingGame::default();

    game.press(ringmark_scoring::Point::new(10.0, 10.0), Duration::ZERO);
    assert_eq!(game.release(display).unwrap().score, 0);

    let logo = reference_logo(display);
    let (first, rest) = logo.points().split_first().unwrap();
    game.press(*first, Duration::ZERO);
    for (k, p) in (1_u32..).zip(rest) {
        game.drag(*p, Duration::from_millis(u64::from(k) * 16));
    }
    let best = game.release(display).unwrap().score;

    let session = game.session();
    assert_eq!(session.attempts, 2);
    assert_eq!(session.best_score, best);
}
