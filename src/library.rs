//! Music library discovery.
//!
//! Walks a directory tree and produces the ordered list of playable tracks
//! shown in the track list.

mod model;
mod scan;

pub use model::*;
pub use scan::*;
