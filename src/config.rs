//! Configuration: the persisted music-directory record and runtime settings.
//!
//! `store` owns the small `config.json` record that remembers the chosen
//! music directory. `schema`/`load` describe the optional settings file that
//! tunes scanning, controls, UI text and logging.

mod load;
mod schema;
mod store;

pub use schema::*;
pub use store::*;
