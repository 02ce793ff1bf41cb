use serde::Deserialize;
use std::fs;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Source IPs allowed to post to /webhook. None means open.
    pub allowed_ips: Option<Vec<String>>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct DhanConfig {
    pub client_id: String,
    /// Usually left out of the file and supplied via DHAN_ACCESS_TOKEN.
    pub access_token: Option<String>,
    #[serde(default = "default_dhan_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_dhan_base_url() -> String {
    "https://api.dhan.co".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogConfig {
    /// http(s) URL or local path of the scrip-master CSV.
    pub source: String,
    /// Cron expression for background reloads; unset disables them.
    pub refresh_cron: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dhan: DhanConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Self {
        let config_path = "config.yaml";
        let content = fs::read_to_string(config_path).expect("Failed to read config.yaml");

        // Strip BOM if present
        let content = content.strip_prefix("\u{feff}").unwrap_or(&content);

        let config: AppConfig = serde_yaml::from_str(content).expect("Failed to parse config.yaml");
        config
    }
}
