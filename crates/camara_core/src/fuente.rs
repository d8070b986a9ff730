use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::schema::{RawActa, RawDiputado};

/// The two read-only fetch capabilities the core consumes. Everything
/// behind this trait is an external collaborator; the core never cares
/// whether the payloads came over HTTP or from a fixture.
#[async_trait]
pub trait FuenteDatos: Send + Sync {
    async fn fetch_diputados(&self) -> Result<Vec<RawDiputado>>;
    async fn fetch_actas(&self) -> Result<Vec<RawActa>>;
}

/// Live source backed by the public deputies API.
pub struct HttpFuente {
    client: Client,
    base_url: String,
}

impl HttpFuente {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("no se pudo construir el cliente http")?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, recurso: &str) -> Result<T> {
        let url = format!("{}/{recurso}", self.base_url);
        let respuesta = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fallo la peticion a {url}"))?
            .error_for_status()
            .with_context(|| format!("respuesta no exitosa de {url}"))?;
        respuesta
            .json()
            .await
            .with_context(|| format!("cuerpo invalido de {url}"))
    }
}

#[async_trait]
impl FuenteDatos for HttpFuente {
    async fn fetch_diputados(&self) -> Result<Vec<RawDiputado>> {
        self.get_json("diputados").await
    }

    async fn fetch_actas(&self) -> Result<Vec<RawActa>> {
        self.get_json("actas").await
    }
}

/// In-memory source: test fixtures and the CLI's offline mode.
#[derive(Debug, Clone, Default)]
pub struct FuenteEstatica {
    pub diputados: Vec<RawDiputado>,
    pub actas: Vec<RawActa>,
}

impl FuenteEstatica {
    /// Load both payloads from `<dir>/diputados.json` and
    /// `<dir>/actas.json`, as previously saved from the API.
    pub fn desde_directorio(dir: &Path) -> Result<Self> {
        let diputados = leer_json(&dir.join("diputados.json"))?;
        let actas = leer_json(&dir.join("actas.json"))?;
        Ok(Self { diputados, actas })
    }
}

fn leer_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("no se pudo leer {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("json invalido en {}", path.display()))
}

#[async_trait]
impl FuenteDatos for FuenteEstatica {
    async fn fetch_diputados(&self) -> Result<Vec<RawDiputado>> {
        Ok(self.diputados.clone())
    }

    async fn fetch_actas(&self) -> Result<Vec<RawActa>> {
        Ok(self.actas.clone())
    }
}
