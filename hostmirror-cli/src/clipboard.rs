use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to run the clipboard helper: {0}")]
    Io(#[from] std::io::Error),
}

/// Hands rendered text to the platform clipboard by piping it into
/// whichever helper the platform ships. Fire-and-forget: a failure is
/// reported once and never retried.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    log::debug!("copying {} bytes to the clipboard", text.len());

    #[cfg(target_os = "macos")]
    {
        copy_command("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        for (cmd, args) in [
            ("wl-copy", &[][..]),
            ("xclip", &["-selection", "clipboard"][..]),
            ("xsel", &["--clipboard", "--input"][..]),
        ] {
            if copy_command(cmd, args, text).is_ok() {
                return Ok(());
            }
        }

        Err(ClipboardError::Unavailable(
            "no clipboard helper found (tried wl-copy, xclip, xsel)".to_string(),
        ))
    }

    #[cfg(target_os = "windows")]
    {
        copy_command("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(ClipboardError::Unavailable(
            "no clipboard helper known for this platform".to_string(),
        ))
    }
}

fn copy_command(cmd: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd).args(args).stdin(Stdio::piped()).spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ClipboardError::Unavailable("clipboard helper has no stdin".to_string()))?;
    stdin.write_all(text.as_bytes())?;
    drop(stdin);

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Unavailable(format!(
            "clipboard helper '{cmd}' exited with failure"
        )))
    }
}
