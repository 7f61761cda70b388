// ABOUTME: Best-effort hand-off of the consent URL to the operator's browser
// ABOUTME: Launch failures are reported to the caller but never stop the setup flow

use std::io;
use tracing::debug;

/// Opens a URL for the operator
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// System default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        debug!("Opening browser");
        open::that(url)
    }
}
