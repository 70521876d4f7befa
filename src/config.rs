use crate::error::{AppError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "offcloud-probe";
const ORGANIZATION: &str = "offcloud";

#[derive(Default, Deserialize, Serialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

pub struct Config {
    config_path: PathBuf,
    config: ConfigFile,
}

impl Config {
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", ORGANIZATION, APP_NAME).ok_or_else(|| {
            AppError::Configuration("Could not determine config directory".into())
        })?;

        fs::create_dir_all(proj_dirs.config_dir())?;

        let config_path = proj_dirs.config_dir().join("config.toml");
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            toml::from_str(&content).unwrap_or_default()
        } else {
            ConfigFile::default()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn get_api_key(&self) -> Result<Option<String>> {
        Ok(self.config.api_key.clone())
    }

    pub fn save_api_key(&mut self, key: &str) -> Result<()> {
        self.config.api_key = Some(key.to_string());

        let toml = toml::to_string_pretty(&self.config)
            .map_err(|e| AppError::Configuration(format!("Failed to serialize config: {}", e)))?;

        fs::write(&self.config_path, toml)?;

        // Keep the stored key private on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.config_path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    pub fn clear_api_key(&self) -> Result<()> {
        let config = ConfigFile::default();
        let toml = toml::to_string_pretty(&config)
            .map_err(|e| AppError::Configuration(format!("Failed to serialize config: {}", e)))?;
        fs::write(&self.config_path, toml)?;
        Ok(())
    }
}
