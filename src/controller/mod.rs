pub mod delays;
pub mod macos;
pub mod traits;
pub mod windows;

use std::time::Duration;

use crate::error::{Error, Result};
use crate::track::{Capabilities, PlayerState, TrackInfo};

pub use traits::PlatformController;

/// OS-detecting facade over the platform backends.
///
/// Picks a backend once at construction and delegates every call to it
/// unchanged, with two exceptions: volume input is range-checked here so a
/// bad level never reaches a scripting bridge, and
/// [`wait_until_playing`](Spotify::wait_until_playing) adds the one poll
/// loop used to verify playback started.
pub struct Spotify {
    backend: Box<dyn PlatformController>,
}

impl Spotify {
    /// Select the backend for the current OS. Fails fast with
    /// [`Error::UnsupportedPlatform`] anywhere we have no backend.
    pub fn new() -> Result<Self> {
        #[cfg(target_os = "macos")]
        {
            Ok(Self::with_backend(Box::new(macos::MacSpotify::new())))
        }
        #[cfg(target_os = "windows")]
        {
            Ok(Self::with_backend(Box::new(windows::WinSpotify::new())))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            Err(Error::UnsupportedPlatform(std::env::consts::OS))
        }
    }

    /// Wrap an explicit backend. Used by tests to drive the facade with a
    /// mock controller.
    pub fn with_backend(backend: Box<dyn PlatformController>) -> Self {
        Self { backend }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.backend.capabilities()
    }

    pub fn is_running(&self) -> bool {
        self.backend.is_running()
    }

    pub fn launch(&self) -> Result<()> {
        self.backend.launch()
    }

    pub fn bring_to_front(&self) -> Result<()> {
        self.backend.bring_to_front()
    }

    pub fn play(&self) -> Result<()> {
        self.backend.play()
    }

    pub fn pause(&self) -> Result<()> {
        self.backend.pause()
    }

    pub fn play_pause(&self) -> Result<()> {
        self.backend.play_pause()
    }

    pub fn next(&self) -> Result<()> {
        self.backend.next()
    }

    pub fn previous(&self) -> Result<()> {
        self.backend.previous()
    }

    pub fn search(&self, query: &str) -> Result<()> {
        self.backend.search(query)
    }

    pub fn select_first_result(&self) -> Result<()> {
        self.backend.select_first_result()
    }

    pub fn play_playlist_by_name(&self, name: &str) -> Result<()> {
        self.backend.play_playlist_by_name(name)
    }

    pub fn get_status(&self) -> Result<PlayerState> {
        self.backend.get_status()
    }

    pub fn get_current_track(&self) -> Result<Option<TrackInfo>> {
        self.backend.get_current_track()
    }

    pub fn seek(&self, position_secs: f64) -> Result<()> {
        self.backend.seek(position_secs)
    }

    pub fn play_uri(&self, uri: &str) -> Result<()> {
        self.backend.play_uri(uri)
    }

    /// Range-checked before any scripted command is issued.
    pub fn set_volume(&self, level: u8) -> Result<()> {
        if level > 100 {
            return Err(Error::CommandFailed(format!(
                "volume must be between 0 and 100, got {}",
                level
            )));
        }
        self.backend.set_volume(level)
    }

    pub fn get_volume(&self) -> Result<u8> {
        self.backend.get_volume()
    }

    pub fn set_shuffle(&self, enabled: bool) -> Result<()> {
        self.backend.set_shuffle(enabled)
    }

    pub fn get_shuffle(&self) -> Result<bool> {
        self.backend.get_shuffle()
    }

    pub fn set_repeat(&self, enabled: bool) -> Result<()> {
        self.backend.set_repeat(enabled)
    }

    pub fn get_repeat(&self) -> Result<bool> {
        self.backend.get_repeat()
    }

    /// Block until the backend reports playing, or time out.
    pub fn wait_until_playing(&self, timeout: Duration) -> Result<()> {
        traits::wait_for_state(self.backend.as_ref(), PlayerState::Playing, timeout)
    }
}
