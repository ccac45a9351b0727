//! Runtime settings sourced from the environment.
//!
//! Every setting has a default and a `KEYSCORE_*` override. Bad values for
//! the port or bind address fail loudly; the soft settings (OCR language,
//! upload cap) silently keep their defaults so a typo cannot take the
//! service down.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;

/// Default Tesseract language when `KEYSCORE_OCR_LANG` is unset.
pub const DEFAULT_OCR_LANG: &str = "eng";

const ENV_PORT: &str = "KEYSCORE_PORT";
const ENV_BIND_ADDR: &str = "KEYSCORE_BIND_ADDR";
const ENV_MODEL_PATH: &str = "KEYSCORE_MODEL_PATH";
const ENV_OCR_LANG: &str = "KEYSCORE_OCR_LANG";
const ENV_MAX_UPLOAD_BYTES: &str = "KEYSCORE_MAX_UPLOAD_BYTES";

/// Runtime settings for the grading service.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port. Default `8080`.
    pub port: u16,

    /// Bind address. Default `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Sentence-encoder export directory (`config.json`, `model.safetensors`,
    /// `tokenizer.json`). `None` runs the deterministic stub embedder.
    pub model_path: Option<PathBuf>,

    /// Tesseract language passed to the OCR fallback. Default `eng`.
    pub ocr_lang: String,

    /// Cap on the whole multipart body in bytes. Default 25 MiB.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            model_path: None,
            ocr_lang: DEFAULT_OCR_LANG.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Reads `KEYSCORE_*` overrides on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: read_port(defaults.port)?,
            bind_addr: read_bind_addr(defaults.bind_addr)?,
            model_path: read_trimmed(ENV_MODEL_PATH).map(PathBuf::from),
            ocr_lang: read_trimmed(ENV_OCR_LANG).unwrap_or(defaults.ocr_lang),
            max_upload_bytes: read_upload_cap(defaults.max_upload_bytes),
        })
    }

    /// Checks that a configured model path points at a directory.
    ///
    /// Whether the directory actually holds a usable model export is the
    /// embedder loader's concern, not the config's.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::ModelPathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::ModelPathNotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// `"{bind_addr}:{port}"`, ready for `TcpListener::bind`.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_port(default: u16) -> Result<u16, ConfigError> {
    let Ok(value) = env::var(ENV_PORT) else {
        return Ok(default);
    };

    let port: u16 = value
        .parse()
        .map_err(|source| ConfigError::PortUnparseable {
            value: value.clone(),
            source,
        })?;

    if port == 0 {
        return Err(ConfigError::PortOutOfRange { value });
    }

    Ok(port)
}

fn read_bind_addr(default: IpAddr) -> Result<IpAddr, ConfigError> {
    let Ok(value) = env::var(ENV_BIND_ADDR) else {
        return Ok(default);
    };

    value
        .parse()
        .map_err(|source| ConfigError::BindAddrUnparseable { value, source })
}

/// Trimmed value of `var`, or `None` when the variable is unset or blank.
fn read_trimmed(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unparseable or zero caps keep the default rather than failing startup.
fn read_upload_cap(default: usize) -> usize {
    env::var(ENV_MAX_UPLOAD_BYTES)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}
