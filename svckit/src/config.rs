use serde::{Deserialize, Serialize};

/// Remote record API location and endpoint paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub fetch_path: String,
    pub create_path: String,
    pub delete_path: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            fetch_path: "/fetch".to_string(),
            create_path: "/create".to_string(),
            delete_path: "/delete".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl ApiConfig {
    /// Joins `base_url` and an endpoint path with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_file: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "reel_dash=info".to_string(),
            log_file: "reel-dash.log".to_string(),
        }
    }
}
