mod app_config;
mod config;
mod model;
mod normalize;
mod unify;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use model::{Platform, PlatformQuote, RawPayload, UnifiedProduct};
pub use normalize::{normalize, AMAZON_STOCK_PLACEHOLDER};
pub use unify::{display_name, unify};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
