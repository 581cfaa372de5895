use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub chroot_dir: String,
    pub dial_timeout_secs: Option<u64>, // Optional to allow default value
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from("0.0.0.0"),
            listen_port: 2121,
            chroot_dir: String::from("./ftproot"),
            dial_timeout_secs: Some(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Config> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))?;

        // Set defaults if not specified
        if config.server.dial_timeout_secs.is_none() {
            config.server.dial_timeout_secs = Some(10);
        }

        Ok(config)
    }

    /// Timeout applied to outbound active-mode dials.
    pub fn dial_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.server.dial_timeout_secs.unwrap_or(10))
    }
}
