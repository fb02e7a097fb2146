use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-editable configuration
/// stored in `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub bridge: LoopConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialConfig {
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_baud")]
    pub baud_rate: u32,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
}

fn default_port() -> String {
    if cfg!(windows) {
        "COM8".to_string()
    } else {
        "/dev/ttyUSB0".to_string()
    }
}

fn default_baud() -> u32 {
    115_200 // Matches the device firmware
}

fn default_read_timeout() -> u64 {
    100
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud(),
            read_timeout_ms: default_read_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// Must match the redirect URI registered for the app
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    /// Defaults to `token.json` next to config.toml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_cache: Option<PathBuf>,
}

fn default_redirect_uri() -> String {
    "http://localhost:8227/callback".to_string()
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            redirect_uri: default_redirect_uri(),
            token_cache: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
    #[serde(default = "default_idle")]
    pub idle_ms: u64,
}

fn default_update_interval() -> u64 {
    1000
}

fn default_idle() -> u64 {
    10
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval(),
            idle_ms: default_idle(),
        }
    }
}
