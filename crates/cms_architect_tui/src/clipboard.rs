//! Clipboard access through the OSC 52 terminal escape sequence.
//!
//! The sequence is interpreted by the terminal emulator, so terminals that
//! disable OSC 52 silently ignore it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cms_architect_error::{TuiError, TuiErrorKind, TuiResult};
use std::io::Write;

/// OSC 52 "set clipboard" sequence for `text`.
///
/// # Examples
///
/// ```
/// use cms_architect_tui::osc52_sequence;
///
/// assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
/// ```
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Writes the OSC 52 sequence for `text` to `out` and flushes it.
#[tracing::instrument(skip(out, text), fields(len = text.len()))]
pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> TuiResult<()> {
    out.write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| TuiError::new(TuiErrorKind::Clipboard(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_sequence_to_output() {
        let mut out = Vec::new();
        copy_to_clipboard(&mut out, "CREATE TABLE users;").unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
        assert_eq!(written, osc52_sequence("CREATE TABLE users;"));
    }
}
