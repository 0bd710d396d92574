//! Integration tests for environment-driven presenter configuration
//!
//! Run with: cargo test --test config_integration_tests

use std::path::PathBuf;
use galaxy_3d_presenter::galaxy3d::PresenterConfig;
use galaxy_3d_presenter::config::{ENV_BATCH_DUMP, ENV_VERBOSE, DEFAULT_FRAMES_IN_FLIGHT};
use serial_test::serial;

fn clear_env() {
    std::env::remove_var(ENV_VERBOSE);
    std::env::remove_var(ENV_BATCH_DUMP);
}

#[test]
#[serial]
fn test_integration_from_env_defaults() {
    clear_env();

    let config = PresenterConfig::from_env();

    assert_eq!(config, PresenterConfig::default());
    assert_eq!(config.frames_in_flight, DEFAULT_FRAMES_IN_FLIGHT);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_integration_from_env_toggles() {
    clear_env();
    std::env::set_var(ENV_VERBOSE, "prt");
    std::env::set_var(ENV_BATCH_DUMP, "/tmp/batches.json");

    let config = PresenterConfig::from_env();

    assert!(config.verbose_batches);
    assert_eq!(config.batch_dump_path, Some(PathBuf::from("/tmp/batches.json")));
    clear_env();
}

#[test]
#[serial]
fn test_integration_from_env_other_verbose_value() {
    clear_env();
    std::env::set_var(ENV_VERBOSE, "all");

    assert!(!PresenterConfig::from_env().verbose_batches);
    clear_env();
}
