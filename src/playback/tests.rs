use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use super::sink::open_source;
use super::testing::{Call, FakeEngine, write_silent_wav};
use super::*;
use crate::library::TrackDescriptor;

fn track(name: &str) -> TrackDescriptor {
    TrackDescriptor::from_path(PathBuf::from("/music").join(name))
}

fn drain(rx: &Receiver<PlaybackChange>) -> Vec<PlaybackChange> {
    rx.try_iter().collect()
}

#[test]
fn format_mmss_truncates_and_pads() {
    assert_eq!(format_mmss(0), "00:00");
    assert_eq!(format_mmss(999), "00:00");
    assert_eq!(format_mmss(59_000), "00:59");
    assert_eq!(format_mmss(65_000), "01:05");
    assert_eq!(format_mmss(65_999), "01:05");
    assert_eq!(format_mmss(600_000), "10:00");
}

#[test]
fn format_mmss_does_not_wrap_minutes() {
    assert_eq!(format_mmss(3_661_000), "61:01");
    assert_eq!(format_mmss(100 * 60_000), "100:00");
}

#[test]
fn select_loads_plays_and_sets_current_track() {
    let mut c = PlaybackController::new(FakeEngine::default());
    let rx = c.subscribe();
    let t = track("a.mp3");

    c.select(&t).unwrap();

    assert_eq!(c.session().status, PlaybackStatus::Playing);
    assert_eq!(c.session().current_track.as_ref(), Some(&t));
    assert_eq!(
        c.engine().calls,
        vec![Call::Load(PathBuf::from("/music/a.mp3")), Call::Play]
    );
    assert_eq!(
        drain(&rx),
        vec![
            PlaybackChange::TrackChanged {
                display_name: "a.mp3".to_string()
            },
            PlaybackChange::DurationChanged(0),
            PlaybackChange::PositionChanged(0),
            PlaybackChange::StatusChanged(PlaybackStatus::Playing),
        ]
    );
}

#[test]
fn select_invalidates_previous_position_and_duration() {
    let mut c = PlaybackController::new(FakeEngine::default());
    c.select(&track("a.mp3")).unwrap();
    c.handle_event(EngineEvent::DurationChanged(200_000));
    c.handle_event(EngineEvent::PositionChanged(50_000));

    c.select(&track("b.mp3")).unwrap();
    assert_eq!(c.session().duration_ms, 0);
    assert_eq!(c.session().position_ms, 0);
    assert_eq!(c.session().current_track, Some(track("b.mp3")));
}

#[test]
fn toggle_pauses_and_resumes_without_touching_track_or_position() {
    let mut c = PlaybackController::new(FakeEngine::default());
    let t = track("a.mp3");
    c.select(&t).unwrap();
    c.handle_event(EngineEvent::PositionChanged(42_000));

    c.toggle();
    assert_eq!(c.session().status, PlaybackStatus::Paused);
    assert_eq!(c.session().current_track.as_ref(), Some(&t));
    assert_eq!(c.session().position_ms, 42_000);

    c.toggle();
    assert_eq!(c.session().status, PlaybackStatus::Playing);
    assert_eq!(c.session().current_track.as_ref(), Some(&t));
    assert_eq!(c.session().position_ms, 42_000);

    assert_eq!(c.engine().calls[2..], [Call::Pause, Call::Play]);
}

#[test]
fn toggle_with_nothing_loaded_is_a_no_op() {
    let mut c = PlaybackController::new(FakeEngine::default());
    let rx = c.subscribe();

    c.toggle();

    assert_eq!(c.session(), &SessionState::default());
    assert!(c.engine().calls.is_empty());
    assert!(drain(&rx).is_empty());
}

#[test]
fn toggle_from_stopped_restarts_playback() {
    let mut c = PlaybackController::new(FakeEngine::default());
    c.select(&track("a.mp3")).unwrap();
    c.handle_event(EngineEvent::StateChanged(PlaybackStatus::Stopped));

    c.toggle();
    assert_eq!(c.session().status, PlaybackStatus::Playing);
    assert_eq!(c.engine().calls.last(), Some(&Call::Play));
}

#[test]
fn failed_select_leaves_session_unchanged_and_notifies() {
    let mut c = PlaybackController::new(FakeEngine::failing());
    let rx = c.subscribe();

    let err = c.select(&track("broken.mp3")).unwrap_err();
    assert!(matches!(err, EngineError::Decode { .. }));
    assert_eq!(c.session(), &SessionState::default());

    let changes = drain(&rx);
    assert_eq!(changes.len(), 1);
    assert!(matches!(changes[0], PlaybackChange::Failed(_)));
}

#[test]
fn seek_is_forwarded_unclamped() {
    let mut c = PlaybackController::new(FakeEngine::default());
    c.seek(9_999_999);
    assert_eq!(c.engine().calls, vec![Call::Seek(9_999_999)]);
    // The position only moves once the engine reports it.
    assert_eq!(c.session().position_ms, 0);
}

#[test]
fn pump_applies_engine_events_in_order() {
    let mut engine = FakeEngine::default();
    engine.pending = vec![
        EngineEvent::DurationChanged(180_000),
        EngineEvent::PositionChanged(1_000),
        EngineEvent::StateChanged(PlaybackStatus::Paused),
        EngineEvent::MetadataLoaded(TrackMetadata {
            title: Some("Song".to_string()),
            ..TrackMetadata::default()
        }),
        EngineEvent::Error("seek failed".to_string()),
    ];
    let mut c = PlaybackController::new(engine);
    let rx = c.subscribe();

    assert_eq!(c.pump(), 5);
    assert_eq!(c.pump(), 0);

    assert_eq!(c.session().duration_ms, 180_000);
    assert_eq!(c.session().position_ms, 1_000);
    assert_eq!(c.session().status, PlaybackStatus::Paused);

    let changes = drain(&rx);
    assert_eq!(changes.len(), 5);
    assert_eq!(changes[0], PlaybackChange::DurationChanged(180_000));
    assert!(matches!(
        changes[3],
        PlaybackChange::MetadataLoaded(ref m) if m.title.as_deref() == Some("Song")
    ));
    assert_eq!(changes[4], PlaybackChange::Failed("seek failed".to_string()));
}

#[test]
fn every_live_subscriber_is_notified_after_one_drops() {
    let mut c = PlaybackController::new(FakeEngine::default());
    let a = c.subscribe();
    let b = c.subscribe();
    let gone = c.subscribe();
    drop(gone);

    c.handle_event(EngineEvent::PositionChanged(5));
    c.handle_event(EngineEvent::PositionChanged(6));
    let expected = vec![
        PlaybackChange::PositionChanged(5),
        PlaybackChange::PositionChanged(6),
    ];
    assert_eq!(drain(&a), expected);
    assert_eq!(drain(&b), expected);
}

#[test]
fn shutdown_reaches_the_engine() {
    let mut c = PlaybackController::new(FakeEngine::default());
    c.shutdown();
    assert_eq!(c.engine().calls, vec![Call::Shutdown]);
}

#[test]
fn read_metadata_reports_wav_duration_without_tags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    write_silent_wav(&path, 8_000, 8_000);

    let meta = read_metadata(&path).unwrap();
    assert_eq!(meta.title, None);
    assert_eq!(meta.cover_art, None);
    let ms = meta.duration.map(|d| d.as_millis()).unwrap_or(0);
    assert!((990..=1010).contains(&ms), "unexpected duration {ms}ms");
}

#[test]
fn read_metadata_rejects_non_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.wav");
    std::fs::write(&path, b"definitely not audio").unwrap();
    assert!(read_metadata(&path).is_err());
}

#[test]
fn open_source_reports_missing_and_undecodable_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.mp3");
    assert!(matches!(open_source(&missing), Err(EngineError::Open { .. })));

    let garbage = dir.path().join("garbage.wav");
    std::fs::write(&garbage, b"RIFF nope").unwrap();
    assert!(matches!(open_source(&garbage), Err(EngineError::Decode { .. })));
}

#[test]
fn open_source_accepts_pcm_wav() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    write_silent_wav(&path, 8_000, 8_000);
    assert!(open_source(&path).is_ok());
}
