use crate::ati::{RequestOptions, ResponseFormat, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use anyhow::{anyhow, Result};
use serde_derive::Deserialize;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_format() -> String {
    "json".to_string()
}

/// Client settings loadable from `ATINTERNET_`-prefixed environment
/// variables. The builder itself never reads the environment; callers that
/// want env-driven setup go through [`load_client_config`] explicitly.
#[derive(Deserialize, Debug)]
pub struct ClientConfig {
    /// Prefixed credential string (`header:...` or `apikey:...`)
    pub auth: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub fetch_all_rows: bool,
    #[serde(default = "default_format")]
    pub format: String,
}

impl ClientConfig {
    /// Converts the loaded settings into request options.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            fetch_all_rows: self.fetch_all_rows,
            format: ResponseFormat::parse_or_default(&self.format),
            page_size: self.page_size,
            base_url: self.base_url.clone(),
        }
    }
}

pub fn load_client_config() -> Result<ClientConfig> {
    match envy::prefixed("ATINTERNET_").from_env::<ClientConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load ClientConfig: {}", err)),
    }
}
