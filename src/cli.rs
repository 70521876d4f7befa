use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::offcloud;

pub const API_KEY_ENV: &str = "OFFCLOUD_API_KEY";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Your Offcloud API key (if not provided, will use OFFCLOUD_API_KEY or the stored key)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Save the provided API key for future use
    #[arg(short = 's', long)]
    pub save_key: bool,

    /// Clear the stored API key
    #[arg(long)]
    pub clear_key: bool,

    /// Base URL of the Offcloud API
    #[arg(long, default_value = offcloud::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Try each candidate deletion endpoint in turn against a request id
    Probe {
        /// Request id of the cloud download to delete
        request_id: String,
    },
    /// Create a cloud download request to get a request id worth probing
    Create {
        /// URL to submit for download
        #[arg(default_value = offcloud::SAMPLE_FILE_URL)]
        url: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn resolve_api_key(&self) -> Result<String> {
        let config = Config::new()?;

        pick_api_key(
            self.key.as_deref(),
            std::env::var(API_KEY_ENV).ok(),
            config.get_api_key()?,
        )
        .ok_or_else(|| {
            AppError::Configuration(
                "No API key provided or stored. Use --key to provide one, set OFFCLOUD_API_KEY, or pass --key with --save-key to store it".into()
            )
        })
    }
}

/// Flag beats environment beats stored config; blank values don't count.
fn pick_api_key(flag: Option<&str>, env: Option<String>, stored: Option<String>) -> Option<String> {
    fn usable(key: &String) -> bool {
        !key.trim().is_empty()
    }

    flag.map(str::to_owned)
        .filter(usable)
        .or(env.filter(usable))
        .or(stored.filter(usable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment_and_stored_key() {
        let picked = pick_api_key(
            Some("from-flag"),
            Some("from-env".to_string()),
            Some("from-config".to_string()),
        );
        assert_eq!(picked.as_deref(), Some("from-flag"));
    }

    #[test]
    fn environment_beats_stored_key() {
        let picked = pick_api_key(None, Some("from-env".to_string()), Some("from-config".to_string()));
        assert_eq!(picked.as_deref(), Some("from-env"));
    }

    #[test]
    fn stored_key_is_the_last_resort() {
        let picked = pick_api_key(None, None, Some("from-config".to_string()));
        assert_eq!(picked.as_deref(), Some("from-config"));
    }

    #[test]
    fn nothing_configured_yields_nothing() {
        assert_eq!(pick_api_key(None, None, None), None);
    }

    #[test]
    fn blank_values_do_not_shadow_real_ones() {
        let picked = pick_api_key(Some("  "), Some(String::new()), Some("from-config".to_string()));
        assert_eq!(picked.as_deref(), Some("from-config"));
    }
}
