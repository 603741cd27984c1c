use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

impl PlayerState {
    /// Parse the lowercase state string the scripting bridges hand back.
    /// Anything unrecognized is treated as stopped.
    pub fn from_bridge(s: &str) -> Self {
        match s.trim() {
            "playing" => PlayerState::Playing,
            "paused" => PlayerState::Paused,
            _ => PlayerState::Stopped,
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// The currently playing track, as much of it as the platform can observe.
///
/// Optional fields stay `None` on platforms that cannot read them (the
/// Windows window title carries neither album nor timing data). They are
/// never guessed or defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration_ms: Option<u64>,
    pub position_ms: Option<u64>,
    pub state: PlayerState,
    /// Spotify URI (`spotify:track:id`), macOS only.
    pub spotify_url: Option<String>,
}

impl TrackInfo {
    /// Shareable web URL, converted from the `spotify:type:id` URI.
    pub fn web_url(&self) -> Option<String> {
        let uri = self.spotify_url.as_deref()?;
        let mut parts = uri.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("spotify"), Some(kind), Some(id), None) if !id.is_empty() => {
                Some(format!("https://open.spotify.com/{}/{}", kind, id))
            }
            _ => None,
        }
    }
}

/// Which contract operations a backend actually supports.
///
/// Callers get `Error::Unsupported` from the operation itself; this struct
/// exists so they can check up front instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub volume: bool,
    /// Album, duration, position and URI on the current track.
    pub track_metadata: bool,
    pub playback_position: bool,
    pub shuffle_repeat: bool,
}
