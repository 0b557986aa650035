//! Address engines.
//!
//! # Data Flow
//! ```text
//! handler (one query or a batch loop)
//!     → AddressEngine::parse  → ordered [{label, value}]
//!     → AddressEngine::expand → set of normalized strings
//! ```
//!
//! # Design Decisions
//! - The engine is a black box behind a trait; handlers never see how it works
//! - Engines are `Send + Sync` and shared as `Arc<dyn AddressEngine>`
//! - Calls are synchronous and CPU-bound; callers move them off the executor
//! - `rules` ships always, `libpostal` only with the `libpostal` feature

pub mod dictionary;
#[cfg(feature = "libpostal")]
pub mod libpostal;
pub mod rules;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;

pub use rules::RuleEngine;

/// One labeled token produced by [`AddressEngine::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedComponent {
    pub label: String,
    pub value: String,
}

impl ParsedComponent {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Failures an engine can report.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine initialization failed: {0}")]
    Initialization(String),

    #[error("input contains an interior NUL byte")]
    InvalidInput,

    #[error("engine returned no result for {operation}")]
    NoResult { operation: &'static str },

    #[error("engine returned text that is not valid UTF-8")]
    InvalidUtf8,
}

/// Parsing and expansion of free-text addresses.
pub trait AddressEngine: Send + Sync + 'static {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Split an address into labeled components, in input order.
    fn parse(&self, text: &str) -> Result<Vec<ParsedComponent>, EngineError>;

    /// Produce the normalized variants of an address.
    fn expand(&self, text: &str) -> Result<Vec<String>, EngineError>;
}

/// Engine handle shared by every request.
pub type SharedEngine = Arc<dyn AddressEngine>;

/// Build the engine selected at compile time.
#[cfg(not(feature = "libpostal"))]
pub fn from_config(_config: &GatewayConfig) -> Result<SharedEngine, EngineError> {
    Ok(Arc::new(RuleEngine::new()))
}

/// Build the engine selected at compile time.
#[cfg(feature = "libpostal")]
pub fn from_config(config: &GatewayConfig) -> Result<SharedEngine, EngineError> {
    let data_dir = config.libpostal_data_dir.as_deref().map(std::path::Path::new);
    Ok(Arc::new(libpostal::LibpostalEngine::setup(data_dir)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_component_serializes_label_and_value() {
        let json = serde_json::to_string(&ParsedComponent::new("road", "main st")).unwrap();
        assert_eq!(json, r#"{"label":"road","value":"main st"}"#);
    }

    #[cfg(not(feature = "libpostal"))]
    #[test]
    fn default_build_uses_rule_engine() {
        let engine = from_config(&GatewayConfig::default()).unwrap();
        assert_eq!(engine.name(), "rules");
    }
}
