use mui_nav::{Clipboard, ClipboardError};

/// The desktop clipboard, opened per copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
        clipboard.set_text(text.to_owned()).map_err(|e| ClipboardError(e.to_string()))
    }
}
