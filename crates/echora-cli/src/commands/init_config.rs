//! Write a starter job configuration.

use anyhow::Context;
use clap::Args;
use echora_config::{EffectSettings, JobConfig, default_config_path, ensure_user_config_dir};
use std::path::PathBuf;

/// Write a starter configuration file.
#[derive(Args)]
pub struct InitConfigArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

/// Run the init-config command.
pub fn run(args: InitConfigArgs) -> anyhow::Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => {
            ensure_user_config_dir()?;
            default_config_path()
        }
    };

    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let config = JobConfig::new(EffectSettings::Echo {
        delay_ms: 250,
        decay: 0.4,
    });
    config.validate()?;
    config
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}
