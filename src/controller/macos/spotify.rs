use std::thread;

use super::script::{escape, is_app_running, run_script};
use crate::controller::delays;
use crate::controller::traits::PlatformController;
use crate::error::{Error, Result};
use crate::track::{Capabilities, PlayerState, TrackInfo};

// System Events key codes.
const KEY_RETURN: u8 = 36;

/// macOS backend: native Spotify AppleScript commands for playback and
/// state, System Events keystrokes for the search UI.
pub struct MacSpotify;

impl MacSpotify {
    pub fn new() -> Self {
        MacSpotify
    }

    fn keystroke(&self, key: &str, command_down: bool) -> Result<()> {
        let using = if command_down {
            " using {command down}"
        } else {
            ""
        };
        run_script(&format!(
            "tell application \"System Events\" to tell process \"Spotify\" to keystroke \"{}\"{}",
            escape(key),
            using
        ))?;
        thread::sleep(delays::KEYSTROKE);
        Ok(())
    }

    fn key_code(&self, code: u8) -> Result<()> {
        run_script(&format!(
            "tell application \"System Events\" to tell process \"Spotify\" to key code {}",
            code
        ))?;
        thread::sleep(delays::KEYSTROKE);
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<()> {
        run_script(&format!(
            "tell application \"System Events\" to tell process \"Spotify\" to keystroke \"{}\"",
            escape(text)
        ))?;
        thread::sleep(delays::TYPE_PER_CHAR * text.len() as u32 + delays::UI);
        Ok(())
    }
}

impl Default for MacSpotify {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformController for MacSpotify {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            volume: true,
            track_metadata: true,
            playback_position: true,
            shuffle_repeat: true,
        }
    }

    fn is_running(&self) -> bool {
        is_app_running("Spotify")
    }

    fn launch(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to activate")?;
        thread::sleep(delays::LAUNCH);
        Ok(())
    }

    fn bring_to_front(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to activate")?;
        thread::sleep(delays::UI);
        Ok(())
    }

    fn play(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to play")?;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to pause")?;
        Ok(())
    }

    fn play_pause(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to playpause")?;
        Ok(())
    }

    fn next(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to next track")?;
        Ok(())
    }

    fn previous(&self) -> Result<()> {
        run_script("tell application \"Spotify\" to previous track")?;
        Ok(())
    }

    fn search(&self, query: &str) -> Result<()> {
        self.bring_to_front()?;
        // Cmd+K opens the quick-search overlay.
        self.keystroke("k", true)?;
        thread::sleep(delays::UI);
        self.type_text(query)?;
        thread::sleep(delays::SEARCH);
        Ok(())
    }

    fn select_first_result(&self) -> Result<()> {
        // Return confirms the highlighted (top) result.
        self.key_code(KEY_RETURN)
    }

    fn get_status(&self) -> Result<PlayerState> {
        let state = run_script("tell application \"Spotify\" to player state as string")?;
        Ok(PlayerState::from_bridge(&state))
    }

    fn get_current_track(&self) -> Result<Option<TrackInfo>> {
        let script = r#"
            tell application "Spotify"
                if player state is stopped then
                    return "STOPPED"
                end if
                set tName to name of current track
                set tArtist to artist of current track
                set tAlbum to album of current track
                set tDuration to duration of current track
                set tPosition to player position
                set tState to player state as string
                set tUrl to spotify url of current track
                return tName & "|||" & tArtist & "|||" & tAlbum & "|||" & tDuration & "|||" & tPosition & "|||" & tState & "|||" & tUrl
            end tell
        "#;
        let output = run_script(script)?;
        Ok(parse_track_output(&output))
    }

    fn seek(&self, position_secs: f64) -> Result<()> {
        run_script(&format!(
            "tell application \"Spotify\" to set player position to {}",
            position_secs
        ))?;
        Ok(())
    }

    fn play_uri(&self, uri: &str) -> Result<()> {
        run_script(&format!(
            "tell application \"Spotify\" to play track \"{}\"",
            escape(uri)
        ))?;
        Ok(())
    }

    fn set_volume(&self, level: u8) -> Result<()> {
        run_script(&format!(
            "tell application \"Spotify\" to set sound volume to {}",
            level.min(100)
        ))?;
        Ok(())
    }

    fn get_volume(&self) -> Result<u8> {
        let output = run_script("tell application \"Spotify\" to sound volume")?;
        output
            .parse()
            .map_err(|_| Error::CommandFailed(format!("unexpected volume output: '{}'", output)))
    }

    fn set_shuffle(&self, enabled: bool) -> Result<()> {
        run_script(&format!(
            "tell application \"Spotify\" to set shuffling to {}",
            enabled
        ))?;
        Ok(())
    }

    fn get_shuffle(&self) -> Result<bool> {
        let output = run_script("tell application \"Spotify\" to shuffling")?;
        Ok(output == "true")
    }

    fn set_repeat(&self, enabled: bool) -> Result<()> {
        run_script(&format!(
            "tell application \"Spotify\" to set repeating to {}",
            enabled
        ))?;
        Ok(())
    }

    fn get_repeat(&self) -> Result<bool> {
        let output = run_script("tell application \"Spotify\" to repeating")?;
        Ok(output == "true")
    }
}

/// Parse the pipe-delimited one-shot track read. `STOPPED` sentinel or a
/// malformed record both mean "no track".
fn parse_track_output(output: &str) -> Option<TrackInfo> {
    if output.trim() == "STOPPED" {
        return None;
    }

    let parts: Vec<&str> = output.split("|||").collect();
    if parts.len() < 7 {
        return None;
    }

    // AppleScript prints floats with a locale decimal comma on some systems.
    let position_secs: f64 = parts[4].replace(',', ".").parse().unwrap_or(0.0);
    let duration_ms: u64 = parts[3].parse::<f64>().unwrap_or(0.0) as u64;

    Some(TrackInfo {
        name: parts[0].to_string(),
        artist: parts[1].to_string(),
        album: Some(parts[2].to_string()).filter(|s| !s.is_empty()),
        duration_ms: Some(duration_ms),
        position_ms: Some((position_secs * 1000.0) as u64),
        state: PlayerState::from_bridge(parts[5]),
        spotify_url: Some(parts[6].to_string()).filter(|s| !s.is_empty()),
    })
}
