//! Integration tests for echora-config file loading and output planning.

use echora_config::{ConfigError, EffectSettings, JobConfig};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn load_resolves_output_dir_against_config_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.toml");
    std::fs::write(
        &path,
        r#"
[effect]
mode = "echo"
delay_ms = 120
decay = 0.25

[output]
dir = "rendered"
suffix = "slap"
bit_depth = 16
"#,
    )
    .unwrap();

    let config = JobConfig::load(&path).unwrap();
    config.validate().unwrap();

    let naming = config.output_naming();
    assert_eq!(naming.dir(), Some(dir.path().join("rendered").as_path()));
    assert_eq!(
        naming.output_path_for(&PathBuf::from("/music/take.wav")),
        dir.path().join("rendered/take_slap.wav")
    );

    let params = config.effect.echo_parameters().unwrap().unwrap();
    assert_eq!(params.delay_ms(), 120);
    assert_eq!(params.delay_samples(1000), 120);
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/job.toml");
    let config = JobConfig::new(EffectSettings::Convolution {
        impulse: Some(PathBuf::from("hall.wav")),
        impulse_dir: None,
        pick: None,
        reject_silence: true,
    });

    config.save(&path).unwrap();
    let loaded = JobConfig::load(&path).unwrap();
    assert_eq!(loaded.effect, config.effect);
}

#[test]
fn missing_file_reports_path() {
    let err = JobConfig::load("/nonexistent/echora/job.toml").unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("/nonexistent/echora/job.toml"));
}

#[test]
fn malformed_toml_is_rejected() {
    let err = JobConfig::from_toml("[effect\nmode = ").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn both_impulse_sources_rejected() {
    let config = JobConfig::from_toml(
        r#"
[effect]
mode = "convolution"
impulse = "hall.wav"
impulse_dir = "irs"
pick = "1"
"#,
    )
    .unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidSetting { .. })
    ));
}
