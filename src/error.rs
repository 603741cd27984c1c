use std::time::Duration;

/// Everything that can go wrong while driving the Spotify desktop app.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The OS refused to let us script or send input to another app
    /// (on macOS: System Events error -1743 until the user grants
    /// Automation/Accessibility rights in System Settings).
    #[error("automation permission denied: {0}")]
    PermissionDenied(String),

    /// Spotify is not running and could not be reached or launched.
    #[error("Spotify not found: {0}")]
    AppNotFound(String),

    /// The scripting bridge reported any other failure, or an argument was
    /// rejected before a command was ever issued.
    #[error("{0}")]
    CommandFailed(String),

    /// A wait-for-UI-state loop ran out of budget.
    #[error("timed out after {0:?} waiting for {1}")]
    Timeout(Duration, String),

    /// The operation exists in the contract but not on this backend.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// No backend exists for the current operating system.
    #[error("platform '{0}' is not supported (supported: macOS, Windows)")]
    UnsupportedPlatform(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
