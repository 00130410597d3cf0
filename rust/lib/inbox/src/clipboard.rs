//! System clipboard access.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Something that can receive copied text.
pub trait Clipboard: Send + Sync + 'static {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard; remembers the last text written.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

/// Pipes text into a clipboard program such as `pbcopy`, `wl-copy` or
/// `xclip`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Pick the usual clipboard tool for this platform / session.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", vec![])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", vec![])
        } else {
            Self::new("xclip", vec!["-selection".into(), "clipboard".into()])
        }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::Unavailable(format!("{}: {}", self.program, e)))?;

        // stdin is dropped before the wait so the program sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        // Reap the child even when the write failed.
        let status = child.wait();
        written.map_err(|e| ClipboardError::Write(e.to_string()))?;
        let status = status.map_err(|e| ClipboardError::Write(e.to_string()))?;
        if !status.success() {
            return Err(ClipboardError::Write(format!("{} exited with {}", self.program, status)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_text() {
        let clip = MemoryClipboard::new();
        assert_eq!(clip.contents(), None);
        clip.write_text("first").unwrap();
        clip.write_text("second").unwrap();
        assert_eq!(clip.contents().as_deref(), Some("second"));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let clip = CommandClipboard::new("definitely-not-a-clipboard-tool-xyz", vec![]);
        let err = clip.write_text("hi").unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_is_write_error() {
        let clip = CommandClipboard::new("false", vec![]);
        assert!(matches!(clip.write_text("hi"), Err(ClipboardError::Write(_))));
    }

    #[cfg(unix)]
    #[test]
    fn program_closing_stdin_early_is_write_error() {
        // `true` exits without reading; a write larger than the pipe buffer
        // then fails with a broken pipe.
        let clip = CommandClipboard::new("true", vec![]);
        let text = "x".repeat(1 << 20);
        assert!(matches!(clip.write_text(&text), Err(ClipboardError::Write(_))));
    }

    #[cfg(unix)]
    #[test]
    fn succeeding_program_is_ok() {
        let clip = CommandClipboard::new("cat", vec![]);
        assert!(clip.write_text("hello").is_ok());
    }
}
