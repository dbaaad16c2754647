//! Service configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

use fashionista_pricing::ModelConfig;

pub const BIND_ADDR_ENV: &str = "FASHIONISTA_BIND_ADDR";
pub const MODEL_PATH_ENV: &str = "FASHIONISTA_MODEL_PATH";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// JSON model file; the built-in trained model is used when unset.
    pub model_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup(BIND_ADDR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("{BIND_ADDR_ENV} is not a socket address: {bind_addr}"))?;

        let model_path = lookup(MODEL_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { bind_addr, model_path })
    }

    pub fn load_model_config(&self) -> anyhow::Result<ModelConfig> {
        match &self.model_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading demand model configuration");
                ModelConfig::from_path(path)
                    .with_context(|| format!("failed to load model from {}", path.display()))
            }
            None => {
                tracing::info!("using built-in demand model configuration");
                Ok(ModelConfig::trained())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.model_path, None);
        assert_eq!(config.load_model_config().unwrap(), ModelConfig::trained());
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_ENV, "0.0.0.0:9000"),
            (MODEL_PATH_ENV, "/etc/fashionista/model.json"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.model_path, Some(PathBuf::from("/etc/fashionista/model.json")));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_ENV, "not-an-addr")])).unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_ENV));
    }

    #[test]
    fn loads_model_from_file() {
        let path = std::env::temp_dir().join(format!("fashionista-model-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&ModelConfig::trained()).unwrap()).unwrap();

        let config = ApiConfig {
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap(),
            model_path: Some(path.clone()),
        };
        let loaded = config.load_model_config();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), ModelConfig::trained());
    }

    #[test]
    fn missing_model_file_is_an_error() {
        let config = ApiConfig {
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap(),
            model_path: Some(PathBuf::from("/nonexistent/model.json")),
        };
        assert!(config.load_model_config().is_err());
    }
}
