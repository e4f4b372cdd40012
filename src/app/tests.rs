use super::*;
use crate::library::TrackDescriptor;
use crate::playback::{CoverArt, PlaybackChange, PlaybackStatus, TrackMetadata};
use std::path::PathBuf;

fn t(name: &str) -> TrackDescriptor {
    TrackDescriptor::from_path(PathBuf::from("/music").join(name))
}

fn art(byte: u8) -> CoverArt {
    CoverArt {
        mime_type: Some("image/png".to_string()),
        data: vec![byte; 2048],
    }
}

#[test]
fn next_prev_wrap_around() {
    let mut app = App::new(vec![t("a.mp3"), t("b.mp3"), t("c.mp3")]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected, 1);
}

#[test]
fn navigation_on_empty_list_is_harmless() {
    let mut app = App::new(Vec::new());
    app.next();
    app.prev();
    app.select_last();
    assert_eq!(app.selected, 0);
    assert!(!app.has_tracks());
    assert!(app.track_at(0).is_none());
}

#[test]
fn track_at_follows_list_order() {
    let app = App::new(vec![t("z.mp3"), t("a.mp3")]);
    assert_eq!(app.track_at(0).unwrap().display_name, "z.mp3");
    assert_eq!(app.track_at(1).unwrap().display_name, "a.mp3");
}

#[test]
fn set_tracks_replaces_list_and_resets_selection() {
    let mut app = App::new(vec![t("a.mp3"), t("b.mp3")]);
    app.set_selected(1);
    app.set_tracks(vec![t("c.mp3")]);
    assert_eq!(app.tracks, vec![t("c.mp3")]);
    assert_eq!(app.selected, 0);
}

#[test]
fn set_selected_ignores_out_of_range() {
    let mut app = App::new(vec![t("a.mp3")]);
    app.set_selected(5);
    assert_eq!(app.selected, 0);
}

#[test]
fn prompt_editing_and_blank_means_cancelled() {
    let mut app = App::new(Vec::new());
    app.open_prompt();
    assert_eq!(app.prompt.as_ref().unwrap().input, "");

    for c in "/tmp/x".chars() {
        app.prompt_push(c);
    }
    app.prompt_pop();
    let prompt = app.take_prompt().unwrap();
    assert_eq!(prompt.chosen(), Some("/tmp/"));
    assert!(app.prompt.is_none());

    assert_eq!(DirectoryPrompt::with_input("   ").chosen(), None);
}

#[test]
fn open_prompt_prefills_current_directory() {
    let mut app = App::new(Vec::new());
    app.set_music_dir(PathBuf::from("/home/me/Music"));
    app.open_prompt();
    assert_eq!(app.prompt.unwrap().input, "/home/me/Music");
}

#[test]
fn now_playing_starts_with_placeholders() {
    let np = NowPlaying::default();
    assert_eq!(np.elapsed_label, INITIAL_TIME_LABEL);
    assert_eq!(np.total_label, INITIAL_TIME_LABEL);
    assert_eq!(np.button_label, INITIAL_BUTTON_LABEL);
    assert_eq!(np.ratio(), 0.0);
}

#[test]
fn button_label_follows_status() {
    let mut np = NowPlaying::default();
    np.apply(&PlaybackChange::StatusChanged(PlaybackStatus::Playing));
    assert_eq!(np.button_label, "Pause Music");
    np.apply(&PlaybackChange::StatusChanged(PlaybackStatus::Paused));
    assert_eq!(np.button_label, "Play Music");
    np.apply(&PlaybackChange::StatusChanged(PlaybackStatus::Playing));
    np.apply(&PlaybackChange::StatusChanged(PlaybackStatus::Stopped));
    assert_eq!(np.button_label, "Play Music");
}

#[test]
fn duration_and_position_drive_labels_and_slider() {
    let mut np = NowPlaying::default();
    np.apply(&PlaybackChange::DurationChanged(3_661_000));
    np.apply(&PlaybackChange::PositionChanged(65_000));

    assert_eq!(np.total_label, "61:01");
    assert_eq!(np.slider_max, 3_661_000);
    assert_eq!(np.elapsed_label, "01:05");
    assert_eq!(np.slider_position, 65_000);
    assert!(np.ratio() > 0.0 && np.ratio() < 0.1);
}

#[test]
fn track_change_sets_song_label_and_clears_error() {
    let mut np = NowPlaying::default();
    np.apply(&PlaybackChange::Failed("boom".to_string()));
    np.apply(&PlaybackChange::TrackChanged {
        display_name: "song.mp3".to_string(),
    });
    assert_eq!(np.song_label, "song.mp3");
    assert_eq!(np.error, None);
}

#[test]
fn metadata_title_replaces_song_label_only_when_present() {
    let mut np = NowPlaying::default();
    np.apply(&PlaybackChange::TrackChanged {
        display_name: "song.mp3".to_string(),
    });

    np.apply(&PlaybackChange::MetadataLoaded(TrackMetadata {
        title: Some("   ".to_string()),
        ..TrackMetadata::default()
    }));
    assert_eq!(np.song_label, "song.mp3");

    np.apply(&PlaybackChange::MetadataLoaded(TrackMetadata {
        title: Some("Real Title".to_string()),
        ..TrackMetadata::default()
    }));
    assert_eq!(np.song_label, "Real Title");
}

#[test]
fn missing_cover_art_keeps_previous_image() {
    let mut np = NowPlaying::default();
    np.apply(&PlaybackChange::MetadataLoaded(TrackMetadata {
        cover_art: Some(art(1)),
        ..TrackMetadata::default()
    }));
    np.apply(&PlaybackChange::MetadataLoaded(TrackMetadata::default()));
    assert_eq!(np.cover_art, Some(art(1)));

    np.apply(&PlaybackChange::MetadataLoaded(TrackMetadata {
        cover_art: Some(art(2)),
        ..TrackMetadata::default()
    }));
    assert_eq!(np.cover_art, Some(art(2)));
    assert_eq!(
        np.cover_art_text().as_deref(),
        Some("cover art: image/png, 2 KiB")
    );
}

#[test]
fn ratio_is_clamped_past_the_end() {
    let mut np = NowPlaying::default();
    np.apply(&PlaybackChange::DurationChanged(1_000));
    np.apply(&PlaybackChange::PositionChanged(5_000));
    assert_eq!(np.ratio(), 1.0);
}

#[test]
fn playback_failure_replaces_stale_status() {
    let mut app = App::new(vec![t("a.mp3")]);
    app.set_status("not a directory: /nope");

    app.apply_change(&PlaybackChange::PositionChanged(1_000));
    assert_eq!(app.status_message.as_deref(), Some("not a directory: /nope"));

    app.apply_change(&PlaybackChange::Failed("seek failed".to_string()));
    assert_eq!(app.status_message, None);
    assert_eq!(app.now_playing.error.as_deref(), Some("seek failed"));
    assert_eq!(app.now_playing.elapsed_label, "00:01");
}
