// src/config.rs
use std::net::SocketAddr;

use crate::error::ConfigError;
use crate::gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::thumbnail::{DEFAULT_PROXY_URL, DEFAULT_THUMBNAIL_BASE_URL};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime configuration, read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub thumbnail_base_url: String,
    pub thumbnail_proxy_url: String,
    pub bind_address: SocketAddr,
}

impl StudioConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = get("GEMINI_API_KEY")
            .or_else(|| get("API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let bind = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind.clone()))?;

        Ok(Self {
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            thumbnail_base_url: get("THUMBNAIL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_THUMBNAIL_BASE_URL.to_string()),
            thumbnail_proxy_url: get("THUMBNAIL_PROXY_URL")
                .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string()),
            bind_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StudioConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.thumbnail_base_url, "https://img.youtube.com/vi");
        assert_eq!(config.thumbnail_proxy_url, "https://cors-anywhere.herokuapp.com/");
        assert_eq!(config.bind_address.port(), 3000);
    }

    #[test]
    fn test_api_key_fallback_and_missing() {
        let config = StudioConfig::from_lookup(lookup(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.gemini_api_key, "legacy");

        let err = StudioConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_invalid_bind_address() {
        let err = StudioConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("BIND_ADDRESS", "nowhere")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddress(addr) if addr == "nowhere"));
    }
}
