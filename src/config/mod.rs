//! Runtime settings for the detector and the HTTP server.
//!
//! Defaults reproduce the upstream contract exactly; the binary overrides
//! them from command-line flags or their environment variables.

use std::time::Duration;

use crate::consts::{DEFAULT_BIND, DEFAULT_ENDPOINT, DEFAULT_MODEL_ID, DEFAULT_TIMEOUT};

/// How to reach the upstream emotion-prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub endpoint: String,
    pub model_id: String,
    pub timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Everything `serve` needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub detector: DetectorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            detector: DetectorConfig::default(),
        }
    }
}
