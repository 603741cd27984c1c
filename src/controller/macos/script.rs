use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Run a raw AppleScript command via `osascript -e`.
pub fn run_script(script: &str) -> Result<String> {
    debug!(target: "spotctl::applescript", script);

    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .map_err(|e| Error::CommandFailed(format!("failed to execute osascript: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_failure(stderr.trim()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Map osascript stderr to the error taxonomy. Error -1743 is the Automation
/// permission prompt being denied; -600 means the target process is gone.
fn classify_failure(stderr: &str) -> Error {
    if stderr.contains("-1743") || stderr.contains("Not authorized to send Apple events") {
        Error::PermissionDenied(stderr.to_string())
    } else if stderr.contains("-600") || stderr.contains("isn't running") {
        Error::AppNotFound(stderr.to_string())
    } else {
        Error::CommandFailed(format!("AppleScript error: {}", stderr))
    }
}

/// Check if a macOS application process is alive via pgrep.
pub fn is_app_running(app_name: &str) -> bool {
    let output = Command::new("pgrep").arg("-x").arg(app_name).output();
    match output {
        Ok(o) => o.status.success(),
        Err(_) => false,
    }
}

/// Escape a string for embedding inside a double-quoted AppleScript literal.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_errors_are_classified() {
        let err = classify_failure(
            "execution error: Not authorized to send Apple events to System Events. (-1743)",
        );
        assert!(matches!(err, Error::PermissionDenied(_)));
    }

    #[test]
    fn missing_app_errors_are_classified() {
        let err = classify_failure("execution error: Spotify got an error: Application isn't running. (-600)");
        assert!(matches!(err, Error::AppNotFound(_)));
    }

    #[test]
    fn other_errors_fall_through_to_command_failed() {
        let err = classify_failure("syntax error: Expected end of line but found identifier. (-2741)");
        assert!(matches!(err, Error::CommandFailed(_)));
        assert!(err.to_string().contains("AppleScript error"));
    }

    #[test]
    fn escape_handles_quotes_and_backslashes() {
        assert_eq!(escape(r#"Göstän "best" \ mix"#), r#"Göstän \"best\" \\ mix"#);
        assert_eq!(escape("plain"), "plain");
    }
}
