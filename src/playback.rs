//! Playback: the rodio-backed engine and the controller that drives it.
//!
//! The engine runs on its own audio thread and reports what happened through
//! [`EngineEvent`]s. The [`PlaybackController`] turns user intents into engine
//! commands, folds engine events into the session state and republishes them
//! as [`PlaybackChange`] notifications for the UI.

mod controller;
mod engine;
mod format;
mod metadata;
mod sink;
mod thread;
mod types;

pub use controller::*;
pub use engine::*;
pub use format::*;
pub use metadata::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
