use std::sync::Arc;

use crate::command::{CommandTable, FnCommand};
use crate::error::ClipboardError;
use crate::uri::Uri;

/// Host clipboard used by `cmd:/copy`.
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Registers `cmd:/copy`, which copies its parameter text.
///
/// The command cannot execute without a parameter.
pub fn register_copy_command(table: &mut CommandTable, clipboard: Arc<dyn Clipboard>) {
    let copy = FnCommand::guarded(
        |p| p.is_some(),
        move |p| {
            let Some(text) = p else { return };
            if let Err(e) = clipboard.set_text(text) {
                log::warn!("copy failed: {e}");
            }
        },
    );
    table.insert(Uri::command("copy"), copy.shared());
}
