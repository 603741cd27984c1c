use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Sentinel thrown by our scripts when the Spotify window cannot be focused.
const NO_WINDOW: &str = "SPOTCTL_NO_WINDOW";

/// Run a PowerShell snippet and return trimmed stdout.
pub fn run_powershell(script: &str) -> Result<String> {
    debug!(target: "spotctl::powershell", script);

    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", script])
        .output()
        .map_err(|e| Error::CommandFailed(format!("failed to execute powershell: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_failure(stderr.trim()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Map PowerShell stderr to the error taxonomy. UIPI rejects simulated
/// input to elevated windows with an access-denied error.
fn classify_failure(stderr: &str) -> Error {
    if stderr.contains("Access is denied") || stderr.contains("UnauthorizedAccess") {
        Error::PermissionDenied(stderr.to_string())
    } else if stderr.contains(NO_WINDOW) || stderr.contains("Cannot find a process") {
        Error::AppNotFound(stderr.to_string())
    } else {
        Error::CommandFailed(format!("PowerShell error: {}", stderr))
    }
}

pub fn is_app_running(process_name: &str) -> bool {
    run_powershell(&format!(
        "if (Get-Process -Name '{}' -ErrorAction SilentlyContinue) {{ 'yes' }}",
        process_name
    ))
    .map(|out| out == "yes")
    .unwrap_or(false)
}

/// Focus the Spotify window and send a WScript.Shell SendKeys sequence.
pub fn send_keys(keys: &str) -> Result<()> {
    let script = format!(
        "$wsh = New-Object -ComObject WScript.Shell; \
         if (-not $wsh.AppActivate('Spotify')) {{ throw '{}' }}; \
         Start-Sleep -Milliseconds 50; \
         $wsh.SendKeys('{}')",
        NO_WINDOW,
        ps_quote(keys)
    );
    run_powershell(&script)?;
    Ok(())
}

/// Read the Spotify main window title. `Ok(None)` when the process is
/// alive but has no titled window (minimized to the tray); `AppNotFound`
/// only when the process itself is gone.
pub fn window_title() -> Result<Option<String>> {
    let script = format!(
        "$p = Get-Process -Name 'Spotify' -ErrorAction SilentlyContinue; \
         if ($null -eq $p) {{ throw '{}' }}; \
         ($p | Where-Object {{ $_.MainWindowTitle }} | Select-Object -First 1).MainWindowTitle",
        NO_WINDOW
    );
    let title = run_powershell(&script)?;
    Ok(title_from_output(title))
}

/// Empty bridge output means a running app with no titled window, not an
/// error.
fn title_from_output(output: String) -> Option<String> {
    Some(output).filter(|t| !t.is_empty())
}

/// Escape literal text for SendKeys: `+ ^ % ~ ( ) { } [ ]` are control
/// characters and must be wrapped in braces.
pub fn escape_sendkeys(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '+' | '^' | '%' | '~' | '(' | ')' | '{' | '}' | '[' | ']' => {
                out.push('{');
                out.push(c);
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape for a single-quoted PowerShell string literal.
fn ps_quote(text: &str) -> String {
    text.replace('\'', "''")
}
