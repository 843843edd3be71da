use std::sync::Arc;

mod opener;

/// Opens URLs outside the webview, in the learner's default browser.
pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn UiLinkOpener>;

pub use opener::DesktopLinkOpener;
