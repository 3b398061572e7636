//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `PHILVERIFY_*` environment variables.
//! Scoring and evidence settings live next to their modules
//! ([`ScoringConfig`](crate::scoring::ScoringConfig),
//! [`EvidenceConfig`](crate::evidence::EvidenceConfig)) and share the parsing helpers
//! in [`env`].

pub mod env;
pub mod error;


pub use error::ConfigError;

use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory for the history log. Default: `./data`.
    pub data_dir: PathBuf,

    /// Sentence-embedding model directory (BERT + tokenizer). Unset → Jaccard similarity.
    pub embedding_model_path: Option<PathBuf>,

    /// Sequence-classifier model directory. Unset → lexicon classifier.
    pub classifier_model_path: Option<PathBuf>,

    /// JSON domain-credibility table. Unset → built-in table.
    pub domain_db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            data_dir: PathBuf::from("./data"),
            embedding_model_path: None,
            classifier_model_path: None,
            domain_db_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "PHILVERIFY_PORT";
    const ENV_BIND_ADDR: &'static str = "PHILVERIFY_BIND_ADDR";
    const ENV_DATA_DIR: &'static str = "PHILVERIFY_DATA_DIR";
    const ENV_EMBEDDING_MODEL_PATH: &'static str = "PHILVERIFY_EMBEDDING_MODEL_PATH";
    const ENV_CLASSIFIER_MODEL_PATH: &'static str = "PHILVERIFY_CLASSIFIER_MODEL_PATH";
    const ENV_DOMAIN_DB_PATH: &'static str = "PHILVERIFY_DOMAIN_DB_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            data_dir: env::optional_path(Self::ENV_DATA_DIR).unwrap_or(defaults.data_dir),
            embedding_model_path: env::optional_path(Self::ENV_EMBEDDING_MODEL_PATH),
            classifier_model_path: env::optional_path(Self::ENV_CLASSIFIER_MODEL_PATH),
            domain_db_path: env::optional_path(Self::ENV_DOMAIN_DB_PATH),
        })
    }

    /// Validates configured paths (does not create the data directory).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_dir.clone(),
            });
        }

        for dir in [&self.embedding_model_path, &self.classifier_model_path]
            .into_iter()
            .flatten()
        {
            require_dir(dir)?;
        }

        if let Some(ref path) = self.domain_db_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"`.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Path of the JSON-lines history log.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.jsonl")
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match std::env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::PortParseError {
                        value: value.clone(),
                        source: e,
                    })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match std::env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}

fn require_dir(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
