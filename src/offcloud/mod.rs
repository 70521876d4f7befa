pub mod model;
mod rest;

pub use rest::{DEFAULT_BASE_URL, SAMPLE_FILE_URL};

/// Thin client over the Offcloud HTTP API.
#[derive(Debug, Clone)]
pub struct OffcloudClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}
