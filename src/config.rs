//! Configuración del servicio a partir de variables de entorno (y `.env` si existe).
//!
//! | Variable                     | Default          |
//! |------------------------------|------------------|
//! | `PUEDOCURSAR_BIND`           | `127.0.0.1:8080` |
//! | `PUEDOCURSAR_CATALOG`        | plan embebido    |
//! | `PUEDOCURSAR_CACHE_CAPACITY` | `1024`           |
//! | `PUEDOCURSAR_CORS_ORIGIN`    | cualquier origen |

use std::env;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::{CatalogError, ConfigError};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

pub const ENV_BIND: &str = "PUEDOCURSAR_BIND";
pub const ENV_CATALOG: &str = "PUEDOCURSAR_CATALOG";
pub const ENV_CACHE_CAPACITY: &str = "PUEDOCURSAR_CACHE_CAPACITY";
pub const ENV_CORS_ORIGIN: &str = "PUEDOCURSAR_CORS_ORIGIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub catalog_path: Option<PathBuf>,
    pub cache_capacity: usize,
    pub cors_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND.to_string(),
            catalog_path: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cors_origin: None,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        AppConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de `lookup`; valores vacíos cuentan como ausentes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = AppConfig::default();

        if let Some(bind) = get(ENV_BIND) {
            config.bind_addr = bind;
        }
        config.catalog_path = get(ENV_CATALOG).map(PathBuf::from);
        if let Some(raw) = get(ENV_CACHE_CAPACITY) {
            config.cache_capacity = raw.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                key: ENV_CACHE_CAPACITY,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }
        config.cors_origin = get(ENV_CORS_ORIGIN);

        Ok(config)
    }

    /// Carga el catálogo configurado, o el plan embebido si no hay ruta.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}
