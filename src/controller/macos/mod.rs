pub mod script;
pub mod spotify;

pub use spotify::MacSpotify;
