//! Integration tests for configuration loading
//!
//! Tests run with the package root as working directory, so `config/`
//! resolves to the checked-in defaults.

use std::fs;

use conway_coro::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_loads_checked_in_defaults() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.width, 100);
    assert_eq!(config.height, 100);
    assert_eq!(config.tick_interval_ms, 200);
}

#[test]
#[serial]
fn test_env_override() {
    unsafe {
        std::env::set_var("CONWAY_WIDTH", "42");
        std::env::set_var("CONWAY_TICK_INTERVAL_MS", "75");
    }
    let config = AppConfig::load();
    unsafe {
        std::env::remove_var("CONWAY_WIDTH");
        std::env::remove_var("CONWAY_TICK_INTERVAL_MS");
    }

    let config = config.unwrap();
    assert_eq!(config.width, 42);
    assert_eq!(config.height, 100);
    assert_eq!(config.tick_interval_ms, 75);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = std::env::temp_dir().join(format!("conway_coro_config_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("default.toml"), "width = 30\nheight = 20\n").unwrap();
    fs::write(dir.join("user.toml"), "height = 10\n").unwrap();

    let config = AppConfig::load_from(&dir);
    fs::remove_dir_all(&dir).unwrap();

    let config = config.unwrap();
    assert_eq!(config.width, 30);
    assert_eq!(config.height, 10);
    assert_eq!(config.tick_interval_ms, 200);
}

#[test]
#[serial]
fn test_missing_directory_uses_builtin_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    unsafe { std::env::set_var("CONWAY_HEIGHT", "tall") };
    let result = AppConfig::load_from("does/not/exist");
    unsafe { std::env::remove_var("CONWAY_HEIGHT") };

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("configuration error"));
}

#[test]
#[serial]
fn test_negative_dimension_in_user_file_is_an_error() {
    let dir = std::env::temp_dir().join(format!("conway_coro_negative_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("user.toml"), "width = -3\n").unwrap();

    let result = AppConfig::load_from(&dir);
    fs::remove_dir_all(&dir).unwrap();

    assert!(result.is_err());
}
