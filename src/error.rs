use std::time::Duration;
use thiserror::Error;

/// Errors surfaced while driving the rendered page.
///
/// `WaitTimeout` is only a fault for the load-more count wait; the next-page
/// probe maps it to the end-of-pagination success path inside the navigator.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// A renderer command (navigate, click, read, ...) failed
    #[error("renderer command failed: {0}")]
    Renderer(String),

    /// No WebDriver session could be established
    #[error("failed to start a renderer session: {0}")]
    Session(String),

    /// A required element could not be located
    #[error("required element `{selector}` not found")]
    MissingElement { selector: String },

    /// A wait condition was not satisfied within its budget
    #[error("timed out after {waited:?} waiting for {what}")]
    WaitTimeout { what: String, waited: Duration },

    /// An operation was attempted after the renderer session was closed
    #[error("renderer session already closed")]
    RendererClosed,

    /// A movie URL too malformed to derive a review-listing URL from
    #[error("cannot build a review-listing URL from `{0}`")]
    BadMovieUrl(String),
}

impl CrawlError {
    /// Whether this error is the expiry of a wait budget
    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, CrawlError::WaitTimeout { .. })
    }
}
