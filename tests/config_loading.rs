use std::fs;
use std::path::PathBuf;

use vivarium_core::{SimConfig, SimError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vivarium-{}-{name}.toml", std::process::id()))
}

#[test]
fn test_missing_config_is_written_with_defaults() {
    let path = scratch_path("missing");
    let _ = fs::remove_file(&path);

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(config, SimConfig::default());
    assert!(path.exists());
    assert_eq!(SimConfig::load(&path).unwrap(), config);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_partial_config_overrides_only_given_keys() {
    let path = scratch_path("partial");
    let content = "[world]\nwidth = 300\nseed = 9\n\n[lifecycle]\nhunger_interval = 7\n";
    fs::write(&path, content).unwrap();

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(config.world.width, 300);
    assert_eq!(config.world.height, 10_000);
    assert_eq!(config.world.seed, Some(9));
    assert_eq!(config.lifecycle.hunger_interval, 7);
    assert_eq!(config.organism.memory_size, 1000);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_invalid_config_is_rejected() {
    let path = scratch_path("invalid");
    fs::write(&path, "[organism]\nmemory_size = 0\n").unwrap();
    assert!(matches!(SimConfig::load(&path), Err(SimError::InvalidConfig(_))));

    fs::write(&path, "[organism\nmemory_size = ").unwrap();
    assert!(matches!(SimConfig::load(&path), Err(SimError::ConfigParse(_))));
    let _ = fs::remove_file(&path);
}
