//! Job configuration for echora.
//!
//! Everything a processing run depends on is carried in explicit values
//! rather than process-wide state:
//!
//! - **Job config**: [`JobConfig`] loaded from / saved to TOML
//! - **Output naming**: [`OutputNaming`] derives batch output paths
//! - **Paths**: platform config directories
//!
//! # Example
//!
//! ```rust,no_run
//! use echora_config::{EffectSettings, JobConfig};
//!
//! let config = JobConfig::load("job.toml").unwrap();
//! config.validate().unwrap();
//!
//! let mut echo = JobConfig::new(EffectSettings::Echo { delay_ms: 300, decay: 0.4 });
//! echo.output.bit_depth = 24;
//! echo.save("echo.toml").unwrap();
//! ```

mod error;
mod job;
mod naming;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use job::{BatchSettings, EffectSettings, JobConfig, OutputSettings};
pub use naming::OutputNaming;
pub use paths::{default_config_path, ensure_user_config_dir, find_config, user_config_dir};
