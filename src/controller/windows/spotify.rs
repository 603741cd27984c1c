use std::thread;

use super::automation::{escape_sendkeys, is_app_running, run_powershell, send_keys, window_title};
use crate::controller::delays;
use crate::controller::traits::PlatformController;
use crate::error::{Error, Result};
use crate::track::{Capabilities, PlayerState, TrackInfo};

/// Windows backend: simulated keystrokes through WScript.Shell for control,
/// window-title reads for state.
///
/// The title is the only state the app exposes here, and it only carries
/// `Artist - Song` while something is playing. Paused and stopped are
/// indistinguishable (both show a bare "Spotify" title), and album, timing
/// and volume are not observable at all, so those operations report
/// unsupported instead of inventing values.
pub struct WinSpotify;

impl WinSpotify {
    pub fn new() -> Self {
        WinSpotify
    }
}

impl Default for WinSpotify {
    fn default() -> Self {
        Self::new()
    }
}

/// Titles the app uses when no track is active.
const IDLE_TITLES: [&str; 3] = ["Spotify", "Spotify Free", "Spotify Premium"];

impl PlatformController for WinSpotify {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            volume: false,
            track_metadata: false,
            playback_position: false,
            shuffle_repeat: false,
        }
    }

    fn is_running(&self) -> bool {
        is_app_running("Spotify")
    }

    fn launch(&self) -> Result<()> {
        // The spotify: URI handler starts the desktop app.
        run_powershell("Start-Process 'spotify:'")?;
        thread::sleep(delays::LAUNCH);
        Ok(())
    }

    fn bring_to_front(&self) -> Result<()> {
        // AppActivate with an empty key sequence just focuses the window.
        send_keys("")?;
        thread::sleep(delays::UI);
        Ok(())
    }

    fn play(&self) -> Result<()> {
        // Space toggles; only send it when not already playing.
        if self.get_status()? != PlayerState::Playing {
            self.play_pause()?;
        }
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        if self.get_status()? == PlayerState::Playing {
            self.play_pause()?;
        }
        Ok(())
    }

    fn play_pause(&self) -> Result<()> {
        send_keys(" ")?;
        thread::sleep(delays::KEYSTROKE);
        Ok(())
    }

    fn next(&self) -> Result<()> {
        send_keys("^{RIGHT}")?;
        thread::sleep(delays::KEYSTROKE);
        Ok(())
    }

    fn previous(&self) -> Result<()> {
        send_keys("^{LEFT}")?;
        thread::sleep(delays::KEYSTROKE);
        Ok(())
    }

    fn search(&self, query: &str) -> Result<()> {
        self.bring_to_front()?;
        // Ctrl+K opens the quick-search overlay.
        send_keys("^k")?;
        thread::sleep(delays::UI);
        send_keys(&escape_sendkeys(query))?;
        thread::sleep(delays::TYPE_PER_CHAR * query.len() as u32 + delays::SEARCH);
        Ok(())
    }

    fn select_first_result(&self) -> Result<()> {
        send_keys("{ENTER}")?;
        thread::sleep(delays::KEYSTROKE);
        Ok(())
    }

    fn get_status(&self) -> Result<PlayerState> {
        let title = window_title()?;
        Ok(state_from_title(title.as_deref()))
    }

    fn get_current_track(&self) -> Result<Option<TrackInfo>> {
        let title = window_title()?;
        Ok(title.as_deref().and_then(parse_title))
    }

    fn seek(&self, _position_secs: f64) -> Result<()> {
        Err(Error::Unsupported("seeking"))
    }

    fn play_uri(&self, _uri: &str) -> Result<()> {
        Err(Error::Unsupported("playing by URI"))
    }

    fn set_volume(&self, _level: u8) -> Result<()> {
        Err(Error::Unsupported("volume control"))
    }

    fn get_volume(&self) -> Result<u8> {
        Err(Error::Unsupported("volume control"))
    }

    fn set_shuffle(&self, _enabled: bool) -> Result<()> {
        Err(Error::Unsupported("shuffle control"))
    }

    fn get_shuffle(&self) -> Result<bool> {
        Err(Error::Unsupported("shuffle control"))
    }

    fn set_repeat(&self, _enabled: bool) -> Result<()> {
        Err(Error::Unsupported("repeat control"))
    }

    fn get_repeat(&self) -> Result<bool> {
        Err(Error::Unsupported("repeat control"))
    }
}

fn state_from_title(title: Option<&str>) -> PlayerState {
    match title {
        Some(t) if parse_title(t).is_some() => PlayerState::Playing,
        _ => PlayerState::Stopped,
    }
}

/// Fixed `Artist - Song` pattern. Idle titles and anything without the
/// separator mean no active track.
fn parse_title(title: &str) -> Option<TrackInfo> {
    let title = title.trim();
    if title.is_empty() || IDLE_TITLES.contains(&title) {
        return None;
    }
    let (artist, name) = title.split_once(" - ")?;

    Some(TrackInfo {
        name: name.to_string(),
        artist: artist.to_string(),
        album: None,
        duration_ms: None,
        position_ms: None,
        state: PlayerState::Playing,
        spotify_url: None,
    })
}
