//! Configuration loading from the process environment.

use std::collections::HashMap;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
pub fn load_config() -> Result<GatewayConfig, ConfigError> {
    load_with(None)
}

/// Load and validate configuration from an explicit set of variables.
///
/// Keys use the environment spelling (`LISTEN_PORT`); the process
/// environment is not consulted.
pub fn load_config_from<I, K, V>(vars: I) -> Result<GatewayConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let source: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    load_with(Some(source))
}

fn load_with(source: Option<HashMap<String, String>>) -> Result<GatewayConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(
            config::Environment::default()
                .try_parsing(true)
                .ignore_empty(true)
                .source(source),
        )
        .build()?;

    let config: GatewayConfig = settings.try_deserialize()?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
