pub mod automation;
pub mod spotify;

pub use spotify::WinSpotify;
