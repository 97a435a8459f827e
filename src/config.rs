//! Layered settings for the button, the player, the screen and the playlist.
//!
//! Struct defaults are overlaid by an optional TOML file and then by
//! `PRESSPLAY__*` environment variables.

mod load;
mod schema;

pub use schema::*;
