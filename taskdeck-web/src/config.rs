//! Frontend configuration module
//!
//! Values are fixed at build time through `option_env!`.

use shared::{auth::DEFAULT_SESSION_TTL_HOURS, models::DEFAULT_PAGE_SIZE};

/// Build-time settings of the browser client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// API root; relative values are resolved against the page origin.
    pub api_base_url: String,
    pub page_size: u32,
    pub session_ttl_hours: i64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("TASKDECK_API_URL")
                .unwrap_or("/api")
                .to_string(),
            page_size: option_env!("TASKDECK_PAGE_SIZE")
                .and_then(|value| value.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            session_ttl_hours: option_env!("TASKDECK_SESSION_TTL_HOURS")
                .and_then(|value| value.parse().ok())
                .filter(|hours| *hours > 0)
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

impl WebConfig {
    /// Absolute API root for the HTTP client.
    pub fn resolved_api_url(&self) -> String {
        let origin = web_sys::window().and_then(|window| window.location().origin().ok());
        resolve_against(&self.api_base_url, origin.as_deref())
    }
}

fn resolve_against(base: &str, origin: Option<&str>) -> String {
    match origin {
        Some(origin) if base.starts_with('/') => {
            format!("{}{}", origin.trim_end_matches('/'), base)
        }
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_joins_origin() {
        assert_eq!(
            resolve_against("/api", Some("http://localhost:8080/")),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn absolute_base_is_kept() {
        assert_eq!(
            resolve_against("https://tasks.example.com/api", Some("http://localhost:8080")),
            "https://tasks.example.com/api"
        );
        assert_eq!(resolve_against("/api", None), "/api");
    }

    #[test]
    fn defaults_are_positive() {
        let config = WebConfig::default();
        assert!(config.page_size > 0);
        assert!(config.session_ttl_hours > 0);
    }
}
