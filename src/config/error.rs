//! Configuration failure modes.

use std::path::PathBuf;
use thiserror::Error;

/// Why loading or validating the environment configuration failed.
///
/// Only the hard settings (port, bind address, model path) can produce one
/// of these; soft settings such as the OCR language and the upload cap fall
/// back to their defaults instead of failing startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The port variable parsed but is zero.
    #[error("port '{value}' is out of range (1-65535)")]
    PortOutOfRange { value: String },

    /// The port variable is not numeric.
    #[error("port '{value}' is not a number: {source}")]
    PortUnparseable {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The bind address is not a valid IPv4/IPv6 literal.
    #[error("bind address '{value}' is not a valid IP: {source}")]
    BindAddrUnparseable {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// `KEYSCORE_MODEL_PATH` points at nothing.
    #[error("model directory not found: {path}")]
    ModelPathNotFound { path: PathBuf },

    /// `KEYSCORE_MODEL_PATH` exists but is not a directory.
    #[error("model path is not a directory: {path}")]
    ModelPathNotADirectory { path: PathBuf },
}
