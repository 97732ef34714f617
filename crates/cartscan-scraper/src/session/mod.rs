//! Rendering-session abstraction over the browser engine.
//!
//! Extractors never talk to Chromium directly; they drive a [`RenderSession`]
//! and read [`ElementHandle`]s, so locator logic stays testable against
//! scripted sessions and the engine binding lives in one module
//! ([`chromium`]).

pub mod chromium;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;

pub use chromium::ChromiumFactory;

/// A raw element handle inside a rendered page.
///
/// Lookups are scoped to the node, so per-listing extraction can query inside
/// one container without seeing its siblings.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Value of the named attribute, or `None` when absent.
    async fn attr(&self, name: &str) -> Result<Option<String>, ScraperError>;

    /// Rendered text content of the node, or `None` when it has none.
    async fn text(&self) -> Result<Option<String>, ScraperError>;

    /// First descendant matching `selector`, or `None`.
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle>>, ScraperError>;

    /// All descendants matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>, ScraperError>;
}

/// One live browser context able to render JavaScript-heavy pages.
///
/// A session is exclusive to one extractor and must be closed exactly once;
/// the orchestrator guarantees release on every path.
#[async_trait]
pub trait RenderSession: Send + Sync {
    /// Navigates to `url` and waits for the page to load, bounded by the
    /// session's navigation timeout.
    async fn navigate(&self, url: &str) -> Result<(), ScraperError>;

    /// Waits up to `timeout` for at least one element matching `selector` to
    /// appear. Returns `false` on timeout — callers treat that as "this page
    /// has nothing for us", not as a failure.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool, ScraperError>;

    /// All elements currently matching `selector` in the rendered DOM.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>, ScraperError>;

    /// Tears the session down. Consumes the session so a released handle
    /// cannot be reused.
    async fn close(self: Box<Self>) -> Result<(), ScraperError>;
}

/// Creates rendering sessions, one per concurrent extractor.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] when the browser cannot be started —
    /// fatal for the request that needed it.
    async fn create(&self) -> Result<Box<dyn RenderSession>, ScraperError>;
}
