use crate::app_config::{AppConfig, BrowserSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value fails to parse. No variable is
/// required; every setting has a documented default.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false/1/0, got \"{other}\""),
            }),
        }
    };

    let bind_addr = parse_addr("CARTSCAN_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("CARTSCAN_LOG_LEVEL", "info");

    let chrome_bin = PathBuf::from(or_default("CARTSCAN_CHROME_BIN", "/usr/bin/google-chrome"));
    let headless = parse_bool("CARTSCAN_HEADLESS", "true")?;
    let viewport_width = parse_u32("CARTSCAN_VIEWPORT_WIDTH", "1920")?;
    let viewport_height = parse_u32("CARTSCAN_VIEWPORT_HEIGHT", "1080")?;

    let listing_wait_secs = parse_u64("CARTSCAN_LISTING_WAIT_SECS", "10")?;
    let navigation_timeout_secs = parse_u64("CARTSCAN_NAVIGATION_TIMEOUT_SECS", "20")?;
    let request_deadline_secs = parse_u64("CARTSCAN_REQUEST_DEADLINE_SECS", "45")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        browser: BrowserSettings {
            chrome_bin,
            headless,
            viewport_width,
            viewport_height,
        },
        listing_wait_secs,
        navigation_timeout_secs,
        request_deadline_secs,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::path::Path;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.browser.chrome_bin, Path::new("/usr/bin/google-chrome"));
        assert!(cfg.browser.headless);
        assert_eq!(cfg.browser.viewport_width, 1920);
        assert_eq!(cfg.browser.viewport_height, 1080);
        assert_eq!(cfg.listing_wait_secs, 10);
        assert_eq!(cfg.navigation_timeout_secs, 20);
        assert_eq!(cfg.request_deadline_secs, 45);
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTSCAN_BIND_ADDR"),
            "expected InvalidEnvVar(CARTSCAN_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_chrome_bin_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_CHROME_BIN", "/opt/chromium/chrome");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.browser.chrome_bin, Path::new("/opt/chromium/chrome"));
    }

    #[test]
    fn build_app_config_headless_accepts_numeric_forms() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_HEADLESS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.browser.headless);
    }

    #[test]
    fn build_app_config_headless_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_HEADLESS", "yes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTSCAN_HEADLESS"),
            "expected InvalidEnvVar(CARTSCAN_HEADLESS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_viewport_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_VIEWPORT_WIDTH", "1280");
        map.insert("CARTSCAN_VIEWPORT_HEIGHT", "720");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.browser.viewport_width, 1280);
        assert_eq!(cfg.browser.viewport_height, 720);
    }

    #[test]
    fn build_app_config_listing_wait_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_LISTING_WAIT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTSCAN_LISTING_WAIT_SECS"),
            "expected InvalidEnvVar(CARTSCAN_LISTING_WAIT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_request_deadline_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTSCAN_REQUEST_DEADLINE_SECS", "90");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_deadline_secs, 90);
    }
}
