use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

const API_BASE_URL: &str = "https://api.argentinadatos.com/v1/diputados";

/// Runtime configuration, read from an optional `camara.toml`. Every
/// field has a default; `CAMARA_API_URL` overrides the base URL last.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            user_agent: format!("camara/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load from an explicit path (must exist) or fall back to
    /// `camara.toml` in the working directory when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("no se pudo leer {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("configuracion invalida en {}", path.display()))?
            }
            None => {
                let por_defecto = Path::new("camara.toml");
                if por_defecto.exists() {
                    let raw = fs::read_to_string(por_defecto)?;
                    toml::from_str(&raw).context("configuracion invalida en camara.toml")?
                } else {
                    Config::default()
                }
            }
        };

        if let Ok(url) = env::var("CAMARA_API_URL") {
            config.api_base_url = url;
        }
        Ok(config)
    }
}
