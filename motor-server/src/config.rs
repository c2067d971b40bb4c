//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use motor_core::model::artifacts::{DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use motor_core::ArtifactPaths;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Classifier artifact path
    pub model_path: PathBuf,

    /// Scaler artifact path
    pub scaler_path: PathBuf,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),

            scaler_path: env::var("SCALER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCALER_PATH)),

            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model_path.clone(),
            scaler: self.scaler_path.clone(),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8501,
            log_json: false,
            environment: "development".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8501");
        assert!(!config.is_production());
        assert_eq!(
            config.artifact_paths(),
            ArtifactPaths {
                model: PathBuf::from("final_motor_failure_model.json"),
                scaler: PathBuf::from("scaler.json"),
            }
        );
    }
}
