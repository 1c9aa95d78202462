use std::io;

use crate::uri::Uri;

/// Opens a URI outside the application.
pub trait Launcher: Send + Sync {
    fn launch(&self, uri: &Uri) -> io::Result<()>;
}

/// Hands the URI to the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, uri: &Uri) -> io::Result<()> {
        log::info!("opening {uri} externally");
        open::that(uri.as_str())
    }
}
