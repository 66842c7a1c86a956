//! Job configuration file format.
//!
//! A [`JobConfig`] carries everything a run needs: the effect and its
//! parameters, where outputs go, and how the batch is scheduled. Shells
//! build one (from a file, flags, or both) and pass it down explicitly.

use echora_core::{EchoParameters, SilencePolicy, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::naming::OutputNaming;

/// Bit depths accepted for output files.
const BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Complete configuration for a processing run.
///
/// # TOML Format
///
/// ```toml
/// [effect]
/// mode = "echo"
/// delay_ms = 300
/// decay = 0.4
///
/// [output]
/// dir = "processed"
/// suffix = "echo"
/// bit_depth = 24
///
/// [batch]
/// jobs = 4
/// max_listed_errors = 10
/// ```
///
/// Convolution runs name an impulse file, or a folder plus a pick:
///
/// ```toml
/// [effect]
/// mode = "convolution"
/// impulse_dir = "impulses"
/// pick = "hall"
/// reject_silence = true
/// ```
///
/// Relative paths are resolved against the directory of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobConfig {
    /// Effect selection and parameters.
    pub effect: EffectSettings,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputSettings,

    /// Batch scheduling settings.
    #[serde(default)]
    pub batch: BatchSettings,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Effect selection. Echo and convolution are mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EffectSettings {
    /// Tail-extending echo.
    Echo {
        /// Delay in milliseconds.
        delay_ms: i64,
        /// Decay factor in [0.0, 1.0].
        decay: f32,
    },
    /// Impulse-response convolution.
    Convolution {
        /// Impulse response file.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        impulse: Option<PathBuf>,
        /// Folder of impulse responses to pick from.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        impulse_dir: Option<PathBuf>,
        /// Index (1-based) or file stem within `impulse_dir`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pick: Option<String>,
        /// Fail instead of passing through an all-silent result.
        #[serde(default)]
        reject_silence: bool,
    },
}

impl EffectSettings {
    /// Validated echo parameters, or `None` for convolution.
    pub fn echo_parameters(&self) -> Result<Option<EchoParameters>, ConfigError> {
        match self {
            Self::Echo { delay_ms, decay } => Ok(Some(EchoParameters::new(*delay_ms, *decay)?)),
            Self::Convolution { .. } => Ok(None),
        }
    }

    /// How convolution treats a silent result.
    pub fn silence_policy(&self) -> SilencePolicy {
        match self {
            Self::Convolution {
                reject_silence: true,
                ..
            } => SilencePolicy::Reject,
            _ => SilencePolicy::Passthrough,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    /// Directory for batch outputs (defaults to each input's directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Suffix appended to each input's file stem.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Output bit depth (16, 24 or 32).
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u16,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: None,
            suffix: default_suffix(),
            bit_depth: default_bit_depth(),
        }
    }
}

fn default_suffix() -> String {
    "processed".to_string()
}

fn default_bit_depth() -> u16 {
    32
}

/// Batch scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSettings {
    /// Worker count (defaults to the number of CPUs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Number of failures listed in the summary; all are counted.
    #[serde(default = "default_max_listed_errors")]
    pub max_listed_errors: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            jobs: None,
            max_listed_errors: default_max_listed_errors(),
        }
    }
}

fn default_max_listed_errors() -> usize {
    10
}

impl JobConfig {
    /// Configuration for `effect` with default output and batch settings.
    pub fn new(effect: EffectSettings) -> Self {
        Self {
            effect,
            output: OutputSettings::default(),
            batch: BatchSettings::default(),
            base_dir: None,
        }
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let mut config = Self::from_toml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve a configured path against the config file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Output naming derived from the output settings.
    pub fn output_naming(&self) -> OutputNaming {
        OutputNaming::new(
            self.output.dir.as_deref().map(|d| self.resolve_path(d)),
            self.output.suffix.clone(),
        )
    }

    /// Check every setting without touching the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.effect {
            EffectSettings::Echo { .. } => {
                self.effect.echo_parameters()?;
            }
            EffectSettings::Convolution {
                impulse,
                impulse_dir,
                pick,
                ..
            } => {
                if impulse.is_some() && impulse_dir.is_some() {
                    return Err(ConfigError::invalid(
                        "effect.impulse",
                        "set either impulse or impulse_dir, not both",
                    ));
                }
                if impulse.is_none() && (impulse_dir.is_none() || pick.is_none()) {
                    return Err(ValidationError::NoImpulseSelected.into());
                }
            }
        }

        if !BIT_DEPTHS.contains(&self.output.bit_depth) {
            return Err(ConfigError::invalid(
                "output.bit_depth",
                format!("{} (expected 16, 24 or 32)", self.output.bit_depth),
            ));
        }
        if self.output.suffix.is_empty() && self.output.dir.is_none() {
            return Err(ConfigError::invalid(
                "output.suffix",
                "an empty suffix requires an output directory",
            ));
        }
        if self.batch.jobs == Some(0) {
            return Err(ConfigError::invalid("batch.jobs", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_config_parses_with_defaults() {
        let config = JobConfig::from_toml(
            r#"
            [effect]
            mode = "echo"
            delay_ms = 300
            decay = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(
            config.effect,
            EffectSettings::Echo {
                delay_ms: 300,
                decay: 0.4
            }
        );
        assert_eq!(config.output, OutputSettings::default());
        assert_eq!(config.batch.max_listed_errors, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn convolution_config_parses() {
        let config = JobConfig::from_toml(
            r#"
            [effect]
            mode = "convolution"
            impulse_dir = "irs"
            pick = "2"
            reject_silence = true

            [batch]
            jobs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.effect.silence_policy(), SilencePolicy::Reject);
        assert_eq!(config.batch.jobs, Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = JobConfig::from_toml("[effect]\nmode = \"flanger\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn echo_parameters_validated() {
        let config = JobConfig::new(EffectSettings::Echo {
            delay_ms: 0,
            decay: 0.5,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(ValidationError::NonPositiveDelay(0)))
        ));

        let config = JobConfig::new(EffectSettings::Echo {
            delay_ms: 200,
            decay: 1.5,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(ValidationError::DecayOutOfRange(_)))
        ));
    }

    #[test]
    fn convolution_requires_impulse() {
        let config = JobConfig::new(EffectSettings::Convolution {
            impulse: None,
            impulse_dir: Some(PathBuf::from("irs")),
            pick: None,
            reject_silence: false,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(ValidationError::NoImpulseSelected))
        ));
    }

    #[test]
    fn bad_output_and_batch_settings_rejected() {
        let mut config = JobConfig::new(EffectSettings::Echo {
            delay_ms: 10,
            decay: 0.5,
        });
        config.output.bit_depth = 8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { ref setting, .. }) if setting == "output.bit_depth"
        ));

        config.output.bit_depth = 16;
        config.batch.jobs = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { ref setting, .. }) if setting == "batch.jobs"
        ));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = JobConfig::new(EffectSettings::Convolution {
            impulse: Some(PathBuf::from("hall.wav")),
            impulse_dir: None,
            pick: None,
            reject_silence: false,
        });
        config.output.dir = Some(PathBuf::from("out"));
        config.batch.jobs = Some(2);

        let text = config.to_toml().unwrap();
        let parsed = JobConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        let config = JobConfig::new(EffectSettings::Echo {
            delay_ms: 10,
            decay: 0.5,
        });
        config.save(&path).unwrap();

        let loaded = JobConfig::load(&path).unwrap();
        assert_eq!(
            loaded.resolve_path(Path::new("irs/hall.wav")),
            dir.path().join("irs/hall.wav")
        );
        assert_eq!(
            loaded.resolve_path(Path::new("/abs/hall.wav")),
            PathBuf::from("/abs/hall.wav")
        );
    }
}
