use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Browser/session could not be started or torn down. Fatal for the
    /// request that needed the session.
    #[error("rendering session error: {reason}")]
    Session { reason: String },

    /// Navigation or DOM query failed on a live page. Recovered at the
    /// orchestrator boundary: the platform contributes zero products.
    #[error("page error at {url}: {reason}")]
    Page { url: String, reason: String },
}
