pub mod cli;
pub mod controller;
pub mod error;
pub mod track;

pub use controller::Spotify;
pub use error::{Error, Result};
pub use track::{Capabilities, PlayerState, TrackInfo};
