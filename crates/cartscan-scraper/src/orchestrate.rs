//! Per-request session lifecycle and platform fan-out.
//!
//! Each platform extractor runs concurrently against its own rendering
//! session; the extractors share no mutable state, so the only discipline
//! needed is one session per extractor, released exactly once. Outputs are
//! buffered per platform and concatenated in declaration order regardless of
//! which network round-trip finishes first.

use std::sync::Arc;
use std::time::Duration;

use cartscan_core::{AppConfig, RawProduct};

use crate::error::ScraperError;
use crate::extract::{extract, platform_specs, PlatformSpec};
use crate::session::SessionFactory;

pub struct Orchestrator {
    factory: Arc<dyn SessionFactory>,
    specs: &'static [PlatformSpec],
    listing_wait: Duration,
    request_deadline: Duration,
}

impl Orchestrator {
    #[must_use]
    pub fn new(factory: Arc<dyn SessionFactory>, config: &AppConfig) -> Self {
        Self::with_specs(
            factory,
            platform_specs(),
            Duration::from_secs(config.listing_wait_secs),
            Duration::from_secs(config.request_deadline_secs),
        )
    }

    /// Like [`Orchestrator::new`] but with an explicit platform set and
    /// timing, for exercising the fan-out against scripted sessions.
    #[must_use]
    pub fn with_specs(
        factory: Arc<dyn SessionFactory>,
        specs: &'static [PlatformSpec],
        listing_wait: Duration,
        request_deadline: Duration,
    ) -> Self {
        Self {
            factory,
            specs,
            listing_wait,
            request_deadline,
        }
    }

    /// Runs every platform extractor for `query` and concatenates their
    /// output in platform-declaration order.
    ///
    /// A platform that fails mid-extraction or overruns the request deadline
    /// contributes zero products; partial results are preferred over total
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] when a rendering session could not
    /// be acquired — the one failure that is fatal for the whole request.
    pub async fn run(&self, query: &str) -> Result<Vec<RawProduct>, ScraperError> {
        let mut handles = Vec::with_capacity(self.specs.len());
        for spec in self.specs {
            let factory = Arc::clone(&self.factory);
            let query = query.to_owned();
            let listing_wait = self.listing_wait;
            let deadline = self.request_deadline;
            handles.push((
                spec.platform,
                tokio::spawn(async move {
                    run_platform(factory.as_ref(), spec, &query, listing_wait, deadline).await
                }),
            ));
        }

        // Join everything before deciding the request's fate so no task is
        // left running with an unreleased session.
        let mut buffered = Vec::with_capacity(handles.len());
        for (platform, handle) in handles {
            let joined = handle.await;
            buffered.push((platform, joined));
        }

        let mut all_products = Vec::new();
        let mut fatal: Option<ScraperError> = None;
        for (platform, joined) in buffered {
            match joined {
                Ok(Ok(mut products)) => {
                    tracing::info!(%platform, count = products.len(), "platform finished");
                    all_products.append(&mut products);
                }
                Ok(Err(e)) => {
                    tracing::error!(%platform, error = %e, "session acquisition failed");
                    fatal.get_or_insert(e);
                }
                Err(join_error) => {
                    // A panicking extractor is treated like any other
                    // extractor failure: the platform contributes nothing.
                    tracing::error!(%platform, error = %join_error, "extractor task aborted");
                }
            }
        }

        match fatal {
            Some(e) => Err(e),
            None => Ok(all_products),
        }
    }
}

/// One platform's full lifecycle: acquire a session, extract under the
/// request deadline, release the session on every path.
async fn run_platform(
    factory: &dyn SessionFactory,
    spec: &PlatformSpec,
    query: &str,
    listing_wait: Duration,
    deadline: Duration,
) -> Result<Vec<RawProduct>, ScraperError> {
    let session = factory.create().await?;

    let products =
        match tokio::time::timeout(deadline, extract(session.as_ref(), spec, query, listing_wait))
            .await
        {
            Ok(products) => products,
            Err(_) => {
                tracing::warn!(
                    platform = %spec.platform,
                    deadline_secs = deadline.as_secs(),
                    "request deadline expired, abandoning platform"
                );
                Vec::new()
            }
        };

    if let Err(e) = session.close().await {
        tracing::warn!(platform = %spec.platform, error = %e, "session teardown failed");
    }

    Ok(products)
}
