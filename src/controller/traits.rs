use std::time::Duration;

use crate::error::Result;
use crate::track::{Capabilities, PlayerState, TrackInfo};

use super::delays;

/// Contract every platform backend implements.
///
/// Backends are stateless translators: each method issues one or more
/// scripted commands (native app commands where the OS has them, simulated
/// keystrokes otherwise) and blocks until the bridge returns or fails.
/// No method retries; callers decide whether to try again.
pub trait PlatformController: Send + Sync {
    fn capabilities(&self) -> Capabilities;

    fn is_running(&self) -> bool;

    /// Start the app if needed and wait the fixed launch delay.
    fn launch(&self) -> Result<()>;

    /// Focus the app window so keystrokes land in it.
    fn bring_to_front(&self) -> Result<()>;

    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn play_pause(&self) -> Result<()>;
    fn next(&self) -> Result<()>;
    fn previous(&self) -> Result<()>;

    /// Open the quick-search overlay and type the query. Results are left
    /// visible; pair with [`select_first_result`](Self::select_first_result)
    /// to start playback.
    fn search(&self, query: &str) -> Result<()>;

    /// Confirm the top search result (plays it).
    fn select_first_result(&self) -> Result<()>;

    fn get_status(&self) -> Result<PlayerState>;

    /// `None` while stopped, `Some` otherwise.
    fn get_current_track(&self) -> Result<Option<TrackInfo>>;

    /// Jump to an absolute position in the current track.
    fn seek(&self, position_secs: f64) -> Result<()>;

    /// Play a track or playlist directly by its `spotify:type:id` URI,
    /// bypassing the search UI.
    fn play_uri(&self, uri: &str) -> Result<()>;

    fn set_volume(&self, level: u8) -> Result<()>;
    fn get_volume(&self) -> Result<u8>;

    fn set_shuffle(&self, enabled: bool) -> Result<()>;
    fn get_shuffle(&self) -> Result<bool>;
    fn set_repeat(&self, enabled: bool) -> Result<()>;
    fn get_repeat(&self) -> Result<bool>;

    /// The one composed operation: focus (launching if needed), search for
    /// the playlist, play the top hit. `search` already waits for results
    /// to settle.
    fn play_playlist_by_name(&self, name: &str) -> Result<()> {
        if self.is_running() {
            self.bring_to_front()?;
        } else {
            self.launch()?;
        }
        self.search(name)?;
        self.select_first_result()
    }
}

/// Poll `get_status` until the backend reports the wanted state, or the
/// budget runs out. The only wait loop in the crate.
pub(crate) fn wait_for_state(
    backend: &dyn PlatformController,
    want: PlayerState,
    timeout: Duration,
) -> Result<()> {
    let start = std::time::Instant::now();
    loop {
        if backend.get_status()? == want {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(crate::error::Error::Timeout(
                timeout,
                format!("player state '{}'", want),
            ));
        }
        std::thread::sleep(delays::POLL_INTERVAL);
    }
}
