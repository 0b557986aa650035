//! Configuration schema definitions.
//!
//! Every field maps to one environment variable (`LISTEN_HOST` ->
//! `listen_host`). All fields have defaults so an empty environment is a
//! valid configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind host (`LISTEN_HOST`).
    pub listen_host: String,

    /// Bind port (`LISTEN_PORT`).
    pub listen_port: u16,

    /// PEM certificate chain (`SSL_CERT_FILE`).
    pub ssl_cert_file: Option<String>,

    /// PEM private key (`SSL_KEY_FILE`).
    pub ssl_key_file: Option<String>,

    /// How long in-flight requests may run after shutdown starts.
    pub shutdown_grace_secs: u64,

    /// Maximum entries in one bulk request. `None` means unbounded.
    pub max_batch_size: Option<usize>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Reject malformed JSON with 400 instead of treating it as an empty query.
    pub strict_json: bool,

    /// Log output format: `pretty` or `json`.
    pub log_format: String,

    /// Prometheus exporter bind address (`METRICS_ADDRESS`, an IP literal
    /// with port). Metrics are not exported when unset.
    pub metrics_address: Option<SocketAddr>,

    /// Data directory handed to libpostal (feature `libpostal`).
    pub libpostal_data_dir: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_host: "0.0.0.0".to_string(),
            listen_port: 8080,
            ssl_cert_file: None,
            ssl_key_file: None,
            shutdown_grace_secs: 10,
            max_batch_size: None,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            strict_json: false,
            log_format: "pretty".to_string(),
            metrics_address: None,
            libpostal_data_dir: None,
        }
    }
}

impl GatewayConfig {
    /// `host:port` string passed to the resolver.
    pub fn listen_address(&self) -> String {
        if self.listen_host.contains(':') && !self.listen_host.starts_with('[') {
            // bare IPv6 literal
            format!("[{}]:{}", self.listen_host, self.listen_port)
        } else {
            format!("{}:{}", self.listen_host, self.listen_port)
        }
    }

    /// TLS settings, present only when both the certificate and the key are set.
    pub fn tls(&self) -> Option<TlsConfig> {
        match (non_empty(&self.ssl_cert_file), non_empty(&self.ssl_key_file)) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            _ => None,
        }
    }

    /// True when exactly one of the certificate and key is configured.
    pub fn tls_half_configured(&self) -> bool {
        non_empty(&self.ssl_cert_file).is_some() != non_empty(&self.ssl_key_file).is_some()
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
