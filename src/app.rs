//! Application module: the UI-side model rendered by `ui` and mutated by the
//! runtime.
//!
//! `App` holds the track list, selection and the directory prompt;
//! `NowPlaying` is the projection of playback changes into labels.

mod model;
mod now_playing;

pub use model::*;
pub use now_playing::*;

#[cfg(test)]
mod tests;
