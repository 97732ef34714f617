use std::net::SocketAddr;
use std::path::PathBuf;

/// Launch settings for the headless browser backing each rendering session.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Path to the Chrome/Chromium binary.
    pub chrome_bin: PathBuf,
    /// Run without a visible window. Disable only for local debugging.
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
    pub browser: BrowserSettings,
    /// Bound on the wait for listing containers to appear after navigation.
    pub listing_wait_secs: u64,
    /// Bound on a single page navigation.
    pub navigation_timeout_secs: u64,
    /// Outer deadline for one search request; extractors still running at
    /// expiry are abandoned and the request returns what completed in time.
    pub request_deadline_secs: u64,
}
