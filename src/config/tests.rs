use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_fitscore_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("FITSCORE_PORT");
        env::remove_var("FITSCORE_BIND_ADDR");
        env::remove_var("FITSCORE_ENCODER_PATH");
        env::remove_var("FITSCORE_REGRESSOR_PATH");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.encoder_path.is_none());
    assert_eq!(config.regressor_path, PathBuf::from(DEFAULT_REGRESSOR_PATH));
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8000");

    let config = Config {
        port: 3000,
        ..Config::default()
    };
    assert_eq!(config.socket_addr(), "127.0.0.1:3000");
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_fitscore_env();

    let config = Config::from_env().expect("from_env should succeed with no overrides");
    assert_eq!(config.port, 8000);
    assert!(config.encoder_path.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_fitscore_env();

    let config = with_env_vars(
        &[
            ("FITSCORE_PORT", "9001"),
            ("FITSCORE_BIND_ADDR", "0.0.0.0"),
            ("FITSCORE_ENCODER_PATH", "/opt/models/bert"),
            ("FITSCORE_REGRESSOR_PATH", "/opt/models/ridge.json"),
        ],
        || Config::from_env().expect("from_env should succeed"),
    );

    assert_eq!(config.port, 9001);
    assert_eq!(config.bind_addr, IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.encoder_path, Some(PathBuf::from("/opt/models/bert")));
    assert_eq!(config.regressor_path, PathBuf::from("/opt/models/ridge.json"));
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_fitscore_env();

    let result = with_env_vars(&[("FITSCORE_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(
        result,
        Err(ConfigError::PortParseError { .. })
    ));

    let result = with_env_vars(&[("FITSCORE_PORT", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn test_from_env_blank_encoder_path_is_none() {
    clear_fitscore_env();

    let config = with_env_vars(&[("FITSCORE_ENCODER_PATH", "   ")], || {
        Config::from_env().expect("from_env should succeed")
    });
    assert!(config.encoder_path.is_none());
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_fitscore_env();

    let result = with_env_vars(&[("FITSCORE_BIND_ADDR", "not-an-ip")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
}

#[test]
fn test_validate_missing_regressor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        regressor_path: dir.path().join("missing.json"),
        ..Config::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_regressor_must_be_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        regressor_path: dir.path().to_path_buf(),
        ..Config::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
fn test_validate_encoder_must_be_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("ridge.json");
    std::fs::write(&weights, "{\"weights\": [0.0], \"intercept\": 0.0}").expect("write weights");

    let config = Config {
        regressor_path: weights.clone(),
        encoder_path: Some(weights),
        ..Config::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let weights = dir.path().join("ridge.json");
    std::fs::write(&weights, "{\"weights\": [0.0], \"intercept\": 0.0}").expect("write weights");

    let config = Config {
        regressor_path: weights,
        encoder_path: Some(dir.path().to_path_buf()),
        ..Config::default()
    };

    assert!(config.validate().is_ok());
}
