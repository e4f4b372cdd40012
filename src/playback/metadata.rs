//! Tag reading for the now-playing box.

use std::path::Path;

use lofty::error::LoftyError;
use lofty::picture::{Picture, PictureType};
use lofty::prelude::*;

use super::types::{CoverArt, TrackMetadata};

/// Read title, cover art and container duration from `path`.
pub fn read_metadata(path: &Path) -> Result<TrackMetadata, LoftyError> {
    let tagged = lofty::read_from_path(path)?;

    let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());
    let mut meta = TrackMetadata {
        duration,
        ..TrackMetadata::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        meta.title = tag
            .title()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        meta.cover_art = pick_cover(tag.pictures()).map(|p| CoverArt {
            mime_type: p.mime_type().map(|m| m.as_str().to_string()),
            data: p.data().to_vec(),
        });
    }

    Ok(meta)
}

/// Prefer the front cover, then whatever picture comes first.
fn pick_cover(pictures: &[Picture]) -> Option<&Picture> {
    pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())
}
