use super::*;
use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use serial_test::serial;
use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

const ALL_VARS: &[&str] = &[
    "KEYSCORE_PORT",
    "KEYSCORE_BIND_ADDR",
    "KEYSCORE_MODEL_PATH",
    "KEYSCORE_OCR_LANG",
    "KEYSCORE_MAX_UPLOAD_BYTES",
];

/// Clears every `KEYSCORE_*` variable, runs `f` with `vars` set, clears again.
fn scoped_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    // SAFETY: env mutation in tests; every caller is #[serial].
    unsafe {
        for var in ALL_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = f();

    // SAFETY: same as above.
    unsafe {
        for (key, _) in vars {
            env::remove_var(key);
        }
    }

    result
}

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert!(config.model_path.is_none());
    assert_eq!(config.ocr_lang, DEFAULT_OCR_LANG);
    assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
}

#[test]
fn test_socket_addr_formats_addr_and_port() {
    assert_eq!(Config::default().socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_all_defaults() {
    scoped_env(&[], || {
        let config = Config::from_env().expect("Should fall back to defaults");
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.ocr_lang, "eng");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    });
}

#[test]
#[serial]
fn test_from_env_port_override() {
    scoped_env(&[("KEYSCORE_PORT", "3000")], || {
        let config = Config::from_env().expect("Should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_bind_addr_override() {
    scoped_env(&[("KEYSCORE_BIND_ADDR", "0.0.0.0")], || {
        let config = Config::from_env().expect("Should parse");
        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    scoped_env(&[("KEYSCORE_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("Should parse");
        assert_eq!(config.bind_addr, IpAddr::V6(Ipv6Addr::LOCALHOST));
    });
}

#[test]
#[serial]
fn test_from_env_model_path() {
    scoped_env(&[("KEYSCORE_MODEL_PATH", "/models/all-MiniLM-L6-v2")], || {
        let config = Config::from_env().expect("Should parse");
        assert_eq!(
            config.model_path,
            Some(PathBuf::from("/models/all-MiniLM-L6-v2"))
        );
    });
}

#[test]
#[serial]
fn test_from_env_blank_model_path_means_stub() {
    scoped_env(&[("KEYSCORE_MODEL_PATH", "   ")], || {
        let config = Config::from_env().expect("Should parse");
        assert!(config.model_path.is_none());
    });
}

#[test]
#[serial]
fn test_from_env_ocr_lang_override_and_blank_fallback() {
    scoped_env(&[("KEYSCORE_OCR_LANG", "deu")], || {
        assert_eq!(Config::from_env().expect("Should parse").ocr_lang, "deu");
    });

    scoped_env(&[("KEYSCORE_OCR_LANG", "  ")], || {
        assert_eq!(Config::from_env().expect("Should parse").ocr_lang, "eng");
    });
}

#[test]
#[serial]
fn test_from_env_upload_cap_override() {
    scoped_env(&[("KEYSCORE_MAX_UPLOAD_BYTES", "1048576")], || {
        let config = Config::from_env().expect("Should parse");
        assert_eq!(config.max_upload_bytes, 1_048_576);
    });
}

#[test]
#[serial]
fn test_from_env_bad_upload_cap_keeps_default() {
    for bad in ["not_a_number", "0", "-5"] {
        scoped_env(&[("KEYSCORE_MAX_UPLOAD_BYTES", bad)], || {
            let config = Config::from_env().expect("Soft setting never fails");
            assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        });
    }
}

#[test]
#[serial]
fn test_port_zero_rejected() {
    scoped_env(&[("KEYSCORE_PORT", "0")], || {
        let err = Config::from_env().expect_err("Port 0 must be rejected");
        assert!(matches!(err, ConfigError::PortOutOfRange { .. }));
        assert!(err.to_string().contains("out of range"));
    });
}

#[test]
#[serial]
fn test_port_not_numeric_rejected() {
    scoped_env(&[("KEYSCORE_PORT", "not_a_port")], || {
        let err = Config::from_env().expect_err("Garbage port must be rejected");
        assert!(matches!(err, ConfigError::PortUnparseable { .. }));
        assert!(err.to_string().contains("not a number"));
    });
}

#[test]
#[serial]
fn test_port_above_u16_rejected() {
    scoped_env(&[("KEYSCORE_PORT", "99999")], || {
        let err = Config::from_env().expect_err("Port beyond u16 must be rejected");
        assert!(matches!(err, ConfigError::PortUnparseable { .. }));
    });
}

#[test]
#[serial]
fn test_bad_bind_addr_rejected() {
    scoped_env(&[("KEYSCORE_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().expect_err("Garbage address must be rejected");
        assert!(matches!(err, ConfigError::BindAddrUnparseable { .. }));
        assert!(err.to_string().contains("not a valid IP"));
    });
}

#[test]
fn test_validate_missing_model_dir() {
    let config = Config {
        model_path: Some(PathBuf::from("/nonexistent/all-MiniLM-L6-v2")),
        ..Default::default()
    };

    let err = config.validate().expect_err("Missing dir must fail");
    assert!(matches!(err, ConfigError::ModelPathNotFound { .. }));
}

#[test]
fn test_validate_model_path_pointing_at_file() {
    // Cargo.toml exists but is a file, not a model export directory.
    let config = Config {
        model_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")),
        ..Default::default()
    };

    let err = config.validate().expect_err("File path must fail");
    assert!(matches!(err, ConfigError::ModelPathNotADirectory { .. }));
}

#[test]
fn test_validate_accepts_directory() {
    let config = Config {
        model_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_accepts_stub_mode() {
    assert!(Config::default().validate().is_ok());
}

#[test]
#[serial]
fn test_every_override_at_once() {
    scoped_env(
        &[
            ("KEYSCORE_PORT", "9090"),
            ("KEYSCORE_BIND_ADDR", "0.0.0.0"),
            ("KEYSCORE_MODEL_PATH", "/models/all-MiniLM-L6-v2"),
            ("KEYSCORE_OCR_LANG", "eng+deu"),
            ("KEYSCORE_MAX_UPLOAD_BYTES", "5242880"),
        ],
        || {
            let config = Config::from_env().expect("Should parse the full set");

            assert_eq!(config.port, 9090);
            assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
            assert_eq!(
                config.model_path,
                Some(PathBuf::from("/models/all-MiniLM-L6-v2"))
            );
            assert_eq!(config.ocr_lang, "eng+deu");
            assert_eq!(config.max_upload_bytes, 5_242_880);
            assert_eq!(config.socket_addr(), "0.0.0.0:9090");
        },
    );
}

#[test]
fn test_error_messages_name_the_offending_value() {
    let err = ConfigError::PortOutOfRange {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("'0'"));
    assert!(err.to_string().contains("1-65535"));

    let err = ConfigError::ModelPathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));

    let err = ConfigError::ModelPathNotADirectory {
        path: PathBuf::from("/some/file.bin"),
    };
    assert!(err.to_string().contains("not a directory"));
}
