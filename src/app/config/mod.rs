use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod user;

pub use user::{LoopConfig, SerialConfig, SpotifyConfig, UserConfig};

use crate::app::cli::Args;
use crate::bridge::BridgeTiming;

const APP_DIR: &str = "spotideck";

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join(APP_DIR);

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_token_path() -> PathBuf {
        Self::get_config_dir().join("token.json")
    }

    pub fn get_log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("logs")
    }

    /// Load config.toml from the default location, writing defaults
    /// there on first run.
    pub fn load() -> UserConfig {
        let path = Self::get_config_path();
        if !path.exists() {
            let c = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(&path, content);
            }
            return c;
        }
        Self::load_from(&path)
    }

    /// A missing or broken file falls back to defaults.
    pub fn load_from(path: &Path) -> UserConfig {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Can't read config, using defaults: {e}");
                return UserConfig::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "Invalid config, using defaults: {e}");
            UserConfig::default()
        })
    }

    pub fn generate_default() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }
}

impl UserConfig {
    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(port) = &args.port {
            self.serial.port = port.clone();
        }
        if let Some(baud) = args.baud {
            self.serial.baud_rate = baud;
        }
    }

    pub fn token_cache_path(&self) -> PathBuf {
        self.spotify
            .token_cache
            .clone()
            .unwrap_or_else(AppConfig::get_token_path)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.read_timeout_ms)
    }

    pub fn timing(&self) -> BridgeTiming {
        BridgeTiming {
            update_interval: Duration::from_millis(self.bridge.update_interval_ms),
            idle: Duration::from_millis(self.bridge.idle_ms),
        }
    }
}
