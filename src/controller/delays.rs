use std::time::Duration;

/// Fixed settle delays for UI automation. The desktop app gives us no
/// completion signal, so every action that changes UI state is followed by
/// one of these sleeps.
pub const LAUNCH: Duration = Duration::from_millis(2000);
pub const UI: Duration = Duration::from_millis(500);
pub const SEARCH: Duration = Duration::from_millis(1500);
pub const KEYSTROKE: Duration = Duration::from_millis(100);
/// Extra budget per typed character.
pub const TYPE_PER_CHAR: Duration = Duration::from_millis(20);

/// How long `wait_until_playing` polls before giving up.
pub const PLAYBACK_TIMEOUT: Duration = Duration::from_millis(3000);
/// Poll interval inside the wait loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(300);
