//! Service configuration

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Path to the serialized pipeline artifact
    pub artifact_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            artifact_path: "car_price_pipeline.json".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration: defaults, then an optional `car-price-api` file,
    /// then `CAR_PRICE_API_*` environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&ApiConfig::default())?)
            .add_source(File::with_name("car-price-api").required(false))
            .add_source(Environment::with_prefix("CAR_PRICE_API"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.artifact_path, "car_price_pipeline.json");
    }
}
