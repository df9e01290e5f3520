//! Backend location.

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "DASHBOARD_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base_url: String,
}

impl DashboardConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read `DASHBOARD_API_URL`, falling back to `DEFAULT_API_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(url.trim())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
