// ============================================================================
// Configuration
// ============================================================================
// Lue depuis les variables d'environnement, avec des valeurs par défaut :
//
//   LAZYBANK_API_URL       adresse de base de l'API  (http://localhost:8080)
//   LAZYBANK_DATA_DIR      stockage local            (<data dir>/lazybank)
//   LAZYBANK_LOG_DIR       fichiers de log           (<data dir>/logs)
//   LAZYBANK_TIMEOUT_SECS  timeout HTTP en secondes  (30)
//   LAZYBANK_RECENT_DAYS   fenêtre "récent" du dashboard (30)
//
// Le filtre de logs reste piloté par RUST_LOG (voir main.rs).
// ============================================================================

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use tracing::{debug, info};

use crate::storage::STORAGE_FILE;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RECENT_DAYS: u32 = 30;

/// Nombre de transactions affichées dans "Recent Transactions"
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub timeout: Duration,
    pub recent_days: u32,
}

impl Config {
    /// Charge la configuration depuis l'environnement du processus
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Charge la configuration depuis une source quelconque
    ///
    /// CONCEPT RUST : Closure en paramètre
    /// - Fn(&str) -> Option<String> : n'importe quelle source clé/valeur
    /// - Les tests passent une HashMap au lieu de toucher l'environnement
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("LAZYBANK_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                debug!("LAZYBANK_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });
        let parsed = Url::parse(api_url.trim())
            .with_context(|| format!("LAZYBANK_API_URL is not a valid URL: {api_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("LAZYBANK_API_URL must use http or https, got {}", parsed.scheme());
        }
        let api_url = api_url.trim().trim_end_matches('/').to_string();

        let data_dir = match lookup("LAZYBANK_DATA_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let log_dir = match lookup("LAZYBANK_LOG_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => data_dir.join("logs"),
        };

        let timeout_secs: u64 = parse_or(&lookup, "LAZYBANK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("LAZYBANK_TIMEOUT_SECS must be greater than zero");
        }
        let recent_days: u32 = parse_or(&lookup, "LAZYBANK_RECENT_DAYS", DEFAULT_RECENT_DAYS)?;

        Ok(Self {
            api_url,
            data_dir,
            log_dir,
            timeout: Duration::from_secs(timeout_secs),
            recent_days,
        })
    }

    /// Fichier du magasin local (jeton, numéro de compte, photo)
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    /// Trace la configuration effective (une fois les logs initialisés)
    pub fn log_summary(&self) {
        info!(
            api_url = %self.api_url,
            data_dir = %self.data_dir.display(),
            log_dir = %self.log_dir.display(),
            timeout_secs = self.timeout.as_secs(),
            recent_days = self.recent_days,
            "Configuration loaded"
        );
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("lazybank"))
        .context("no platform data directory, set LAZYBANK_DATA_DIR")
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key} value: {raw}")),
        _ => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
