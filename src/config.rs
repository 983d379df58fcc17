//! Service configuration, built once at startup and shared read-only.

use serde::Serialize;
use std::fmt;

/// Default prefix for every route
pub const DEFAULT_API_PATH: &str = "/seismic-file-metadata/api/v1/";

/// Title reported by the service
pub const PROJECT_TITLE: &str = "Seismic File Metadata Service";

/// Immutable configuration shared by all requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    /// Route prefix, always starting and ending with `/`
    pub api_path: String,

    /// Seismic store service URL handed to the credential configurator
    pub sdms_url: String,

    pub project_title: String,

    pub project_version: String,
}

impl ServiceConfig {
    pub fn new(api_path: &str, sdms_url: impl Into<String>) -> Self {
        Self {
            api_path: normalize_api_path(api_path),
            sdms_url: sdms_url.into(),
            project_title: PROJECT_TITLE.to_string(),
            project_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Full route for a path below the API prefix
    pub fn route(&self, suffix: &str) -> String {
        format!("{}{}", self.api_path, suffix.trim_start_matches('/'))
    }
}

impl fmt::Display for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} at {}",
            self.project_title, self.project_version, self.api_path
        )
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_PATH, "")
    }
}

/// Ensure the prefix starts and ends with a single `/`
pub fn normalize_api_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_path() {
        assert_eq!(normalize_api_path("/seismic/api/v1/"), "/seismic/api/v1/");
        assert_eq!(normalize_api_path("seismic/api/v1"), "/seismic/api/v1/");
        assert_eq!(normalize_api_path(""), "/");
        assert_eq!(normalize_api_path("/"), "/");
    }

    #[test]
    fn test_route() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.route("openzgy/bingrid"),
            "/seismic-file-metadata/api/v1/openzgy/bingrid"
        );
        assert_eq!(config.route("/service-status"), config.route("service-status"));
        assert_eq!(config.project_title, "Seismic File Metadata Service");
    }

    #[test]
    fn test_display_names_service() {
        let config = ServiceConfig::new("files/api", "");
        assert_eq!(
            config.to_string(),
            format!(
                "Seismic File Metadata Service v{} at /files/api/",
                env!("CARGO_PKG_VERSION")
            )
        );
    }
}
