use std::sync::{Arc, Mutex};
use std::time::Duration;

use spotctl::cli::{self, Cmd};
use spotctl::controller::PlatformController;
use spotctl::{Capabilities, Error, PlayerState, Spotify, TrackInfo};

/// Recording backend: every contract call appends its name so tests can
/// assert on the exact scripted sequence the facade would issue.
struct MockBackend {
    running: bool,
    volume_supported: bool,
    state: PlayerState,
    deny_play: bool,
    volume: Mutex<u8>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    fn new() -> Self {
        MockBackend {
            running: true,
            volume_supported: true,
            state: PlayerState::Stopped,
            deny_play: false,
            volume: Mutex::new(50),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Handle that stays readable after the backend is boxed away.
    fn shared_calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl PlatformController for MockBackend {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            volume: self.volume_supported,
            track_metadata: true,
            playback_position: true,
            shuffle_repeat: true,
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn launch(&self) -> spotctl::Result<()> {
        self.record("launch");
        Ok(())
    }

    fn bring_to_front(&self) -> spotctl::Result<()> {
        self.record("bring_to_front");
        Ok(())
    }

    fn play(&self) -> spotctl::Result<()> {
        if self.deny_play {
            return Err(Error::PermissionDenied("not authorized".into()));
        }
        self.record("play");
        Ok(())
    }

    fn pause(&self) -> spotctl::Result<()> {
        self.record("pause");
        Ok(())
    }

    fn play_pause(&self) -> spotctl::Result<()> {
        self.record("play_pause");
        Ok(())
    }

    fn next(&self) -> spotctl::Result<()> {
        self.record("next");
        Ok(())
    }

    fn previous(&self) -> spotctl::Result<()> {
        self.record("previous");
        Ok(())
    }

    fn search(&self, query: &str) -> spotctl::Result<()> {
        self.record(format!("search:{}", query));
        Ok(())
    }

    fn select_first_result(&self) -> spotctl::Result<()> {
        self.record("select_first_result");
        Ok(())
    }

    fn get_status(&self) -> spotctl::Result<PlayerState> {
        Ok(self.state)
    }

    fn get_current_track(&self) -> spotctl::Result<Option<TrackInfo>> {
        match self.state {
            PlayerState::Stopped => Ok(None),
            state => Ok(Some(TrackInfo {
                name: "Mock Song".into(),
                artist: "Mock Artist".into(),
                album: None,
                duration_ms: Some(1_000),
                position_ms: Some(0),
                state,
                spotify_url: None,
            })),
        }
    }

    fn seek(&self, position_secs: f64) -> spotctl::Result<()> {
        self.record(format!("seek:{}", position_secs));
        Ok(())
    }

    fn play_uri(&self, uri: &str) -> spotctl::Result<()> {
        self.record(format!("play_uri:{}", uri));
        Ok(())
    }

    fn set_volume(&self, level: u8) -> spotctl::Result<()> {
        if !self.volume_supported {
            return Err(Error::Unsupported("volume control"));
        }
        self.record(format!("set_volume:{}", level));
        *self.volume.lock().unwrap() = level;
        Ok(())
    }

    fn get_volume(&self) -> spotctl::Result<u8> {
        if !self.volume_supported {
            return Err(Error::Unsupported("volume control"));
        }
        Ok(*self.volume.lock().unwrap())
    }

    fn set_shuffle(&self, enabled: bool) -> spotctl::Result<()> {
        self.record(format!("set_shuffle:{}", enabled));
        Ok(())
    }

    fn get_shuffle(&self) -> spotctl::Result<bool> {
        Ok(false)
    }

    fn set_repeat(&self, enabled: bool) -> spotctl::Result<()> {
        self.record(format!("set_repeat:{}", enabled));
        Ok(())
    }

    fn get_repeat(&self) -> spotctl::Result<bool> {
        Ok(false)
    }
}

#[test]
fn play_playlist_is_launch_search_select_when_cold() {
    let mut backend = MockBackend::new();
    backend.running = false;

    backend.play_playlist_by_name("Focus Mix").unwrap();
    assert_eq!(
        backend.calls(),
        vec!["launch", "search:Focus Mix", "select_first_result"]
    );
}

#[test]
fn play_playlist_focuses_instead_of_relaunching() {
    let backend = MockBackend::new();

    backend.play_playlist_by_name("Focus Mix").unwrap();
    assert_eq!(
        backend.calls(),
        vec!["bring_to_front", "search:Focus Mix", "select_first_result"]
    );
}

#[test]
fn facade_delegates_the_composed_operation() {
    let spotify = Spotify::with_backend(Box::new(MockBackend::new()));
    spotify.play_playlist_by_name("Morning").unwrap();
}

#[test]
fn volume_set_then_get_round_trips() {
    let spotify = Spotify::with_backend(Box::new(MockBackend::new()));

    spotify.set_volume(37).unwrap();
    assert_eq!(spotify.get_volume().unwrap(), 37);
}

#[test]
fn out_of_range_volume_never_reaches_the_backend() {
    let spotify = Spotify::with_backend(Box::new(MockBackend::new()));

    let err = spotify.set_volume(150).unwrap_err();
    assert!(matches!(err, Error::CommandFailed(_)));
    assert!(err.to_string().contains("150"));
    // The mock still holds its initial volume; nothing was scripted.
    assert_eq!(spotify.get_volume().unwrap(), 50);
}

#[test]
fn unsupported_volume_is_a_distinct_outcome() {
    let mut backend = MockBackend::new();
    backend.volume_supported = false;
    let spotify = Spotify::with_backend(Box::new(backend));

    assert!(!spotify.capabilities().volume);
    assert!(matches!(
        spotify.set_volume(30),
        Err(Error::Unsupported(_))
    ));
    // Never a stale or fabricated value.
    assert!(matches!(spotify.get_volume(), Err(Error::Unsupported(_))));
}

#[test]
fn status_while_stopped_has_no_track() {
    let spotify = Spotify::with_backend(Box::new(MockBackend::new()));

    assert_eq!(spotify.get_status().unwrap(), PlayerState::Stopped);
    assert_eq!(spotify.get_current_track().unwrap(), None);
}

#[test]
fn wait_until_playing_returns_once_playing() {
    let mut backend = MockBackend::new();
    backend.state = PlayerState::Playing;
    let spotify = Spotify::with_backend(Box::new(backend));

    spotify
        .wait_until_playing(Duration::from_millis(100))
        .unwrap();
}

#[test]
fn wait_until_playing_times_out_against_a_paused_player() {
    let mut backend = MockBackend::new();
    backend.state = PlayerState::Paused;
    let spotify = Spotify::with_backend(Box::new(backend));

    let err = spotify
        .wait_until_playing(Duration::from_millis(0))
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_, _)));
}

#[test]
fn seek_and_play_uri_delegate_to_the_backend() {
    let backend = MockBackend::new();
    let calls = backend.shared_calls();
    let spotify = Spotify::with_backend(Box::new(backend));

    spotify.seek(42.5).unwrap();
    spotify.play_uri("spotify:track:6kkwzB6hXLIONkEk9JciA6").unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["seek:42.5", "play_uri:spotify:track:6kkwzB6hXLIONkEk9JciA6"]
    );
}

#[test]
fn play_command_sends_play_then_reads_status() {
    let backend = MockBackend::new();
    let calls = backend.shared_calls();
    let spotify = Spotify::with_backend(Box::new(backend));

    cli::run(Cmd::Play, &spotify).unwrap();
    assert_eq!(*calls.lock().unwrap(), vec!["play"]);
}

#[test]
fn backend_errors_propagate_unmodified() {
    let mut backend = MockBackend::new();
    backend.deny_play = true;
    let spotify = Spotify::with_backend(Box::new(backend));

    let err = spotify.play().unwrap_err();
    assert!(matches!(err, Error::PermissionDenied(_)));
    assert!(err.to_string().contains("permission denied"));
}
