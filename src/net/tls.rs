//! TLS configuration and certificate loading.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;

/// Error type for TLS material loading.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no PEM certificates found in {0}")]
    NoCertificates(PathBuf),

    #[error("no PEM private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("invalid PEM in {path}: {source}")]
    Pem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rustls rejected the certificate or key: {0}")]
    Config(#[source] std::io::Error),
}

/// Load TLS configuration from certificate and key files.
///
/// Both files are read once and checked for usable PEM blocks so a bad path
/// or an empty file is reported by name instead of as a generic rustls error.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, TlsError> {
    let cert_pem = read(cert_path).await?;
    let key_pem = read(key_path).await?;

    check_certificates(cert_path, &cert_pem)?;
    check_private_key(key_path, &key_pem)?;

    RustlsConfig::from_pem(cert_pem, key_pem)
        .await
        .map_err(TlsError::Config)
}

async fn read(path: &Path) -> Result<Vec<u8>, TlsError> {
    tokio::fs::read(path).await.map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn check_certificates(path: &Path, pem: &[u8]) -> Result<(), TlsError> {
    let mut reader = BufReader::new(pem);
    let mut count = 0;
    for cert in rustls_pemfile::certs(&mut reader) {
        cert.map_err(|source| TlsError::Pem {
            path: path.to_path_buf(),
            source,
        })?;
        count += 1;
    }
    if count == 0 {
        return Err(TlsError::NoCertificates(path.to_path_buf()));
    }
    Ok(())
}

fn check_private_key(path: &Path, pem: &[u8]) -> Result<(), TlsError> {
    let mut reader = BufReader::new(pem);
    match rustls_pemfile::private_key(&mut reader) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(TlsError::NoPrivateKey(path.to_path_buf())),
        Err(source) => Err(TlsError::Pem {
            path: path.to_path_buf(),
            source,
        }),
    }
}
