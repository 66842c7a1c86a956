//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::{Args, ValueEnum};
use echora_config::{EffectSettings, JobConfig};
use echora_core::{
    AudioTransformer, ConvolutionEngine, EchoParameters, EffectMode, ImpulseResponse,
    SilencePolicy, validate,
};
use echora_io::{WavCodec, list_impulses, load_impulse, select_impulse};
use indicatif::ProgressStyle;
use std::path::{Path, PathBuf};

/// Effect family selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Tail-extending echo
    Echo,
    /// Impulse-response convolution
    Convolution,
}

/// Echo parameters as typed by the user; validated before any file is read.
#[derive(Args, Debug, Default)]
pub struct EchoOpts {
    /// Echo delay in milliseconds (positive integer)
    #[arg(long, value_name = "MS", allow_hyphen_values = true)]
    pub delay: Option<String>,

    /// Echo decay factor between 0.0 and 1.0
    #[arg(long, value_name = "FACTOR", allow_hyphen_values = true)]
    pub decay: Option<String>,
}

impl EchoOpts {
    fn is_set(&self) -> bool {
        self.delay.is_some() || self.decay.is_some()
    }
}

/// Impulse response selection.
#[derive(Args, Debug, Default)]
pub struct ImpulseOpts {
    /// Impulse response WAV file
    #[arg(long, value_name = "WAV", conflicts_with = "impulse_dir")]
    pub impulse: Option<PathBuf>,

    /// Folder of impulse responses (choose one with --pick)
    #[arg(long, value_name = "DIR")]
    pub impulse_dir: Option<PathBuf>,

    /// Impulse to use from the folder: 1-based index or file name
    #[arg(long, value_name = "N|NAME")]
    pub pick: Option<String>,

    /// Fail on an all-silent result instead of writing silence
    #[arg(long)]
    pub reject_silence: bool,
}

impl ImpulseOpts {
    fn is_set(&self) -> bool {
        self.impulse.is_some() || self.impulse_dir.is_some()
    }
}

/// Merge command-line effect flags over an optional config file.
///
/// Flags win. The mode is taken from `--mode`, then inferred from which
/// flags are present, then from the config. Echo text is validated here,
/// before any audio is opened.
pub fn effect_settings(
    mode: Option<Mode>,
    echo: &EchoOpts,
    impulse: &ImpulseOpts,
    config: Option<&JobConfig>,
) -> anyhow::Result<EffectSettings> {
    let mode = mode
        .or_else(|| impulse.is_set().then_some(Mode::Convolution))
        .or_else(|| echo.is_set().then_some(Mode::Echo))
        .or_else(|| {
            config.map(|c| match c.effect {
                EffectSettings::Echo { .. } => Mode::Echo,
                EffectSettings::Convolution { .. } => Mode::Convolution,
            })
        })
        .context("No effect selected. Use --delay/--decay, --impulse, --impulse-dir, or --config")?;

    match mode {
        Mode::Echo => {
            let (config_delay, config_decay) = match config.map(|c| &c.effect) {
                Some(EffectSettings::Echo { delay_ms, decay }) => {
                    (Some(delay_ms.to_string()), Some(decay.to_string()))
                }
                _ => (None, None),
            };
            let delay = echo
                .delay
                .clone()
                .or(config_delay)
                .context("Echo requires --delay")?;
            let decay = echo
                .decay
                .clone()
                .or(config_decay)
                .context("Echo requires --decay")?;
            let params = validate(&delay, &decay)?;
            Ok(EffectSettings::Echo {
                delay_ms: i64::from(params.delay_ms()),
                decay: params.decay(),
            })
        }
        Mode::Convolution => {
            let mut path = None;
            let mut dir = None;
            let mut pick = None;
            let mut reject_silence = impulse.reject_silence;

            if let Some(config) = config
                && let EffectSettings::Convolution {
                    impulse: config_impulse,
                    impulse_dir: config_dir,
                    pick: config_pick,
                    reject_silence: config_reject,
                } = &config.effect
            {
                path = config_impulse.as_deref().map(|p| config.resolve_path(p));
                dir = config_dir.as_deref().map(|p| config.resolve_path(p));
                pick.clone_from(config_pick);
                reject_silence |= *config_reject;
            }

            if impulse.is_set() {
                path.clone_from(&impulse.impulse);
                dir.clone_from(&impulse.impulse_dir);
            }
            if impulse.pick.is_some() {
                pick.clone_from(&impulse.pick);
            }

            Ok(EffectSettings::Convolution {
                impulse: path,
                impulse_dir: dir,
                pick,
                reject_silence,
            })
        }
    }
}

/// Build the effect, loading the selected impulse response if any.
///
/// Paths in `settings` must already be resolved. A convolution with no
/// impulse selected is returned as such; running it reports the error.
pub fn effect_mode(settings: &EffectSettings) -> anyhow::Result<EffectMode> {
    match settings {
        EffectSettings::Echo { delay_ms, decay } => {
            Ok(EffectMode::Echo(EchoParameters::new(*delay_ms, *decay)?))
        }
        EffectSettings::Convolution {
            impulse,
            impulse_dir,
            pick,
            ..
        } => {
            let ir = resolve_impulse(impulse.as_deref(), impulse_dir.as_deref(), pick.as_deref())?;
            Ok(match ir {
                Some(ir) => EffectMode::convolution(ir),
                None => EffectMode::Convolution { impulse: None },
            })
        }
    }
}

/// Load the impulse named by an explicit path or a folder selection.
pub fn resolve_impulse(
    path: Option<&Path>,
    dir: Option<&Path>,
    pick: Option<&str>,
) -> anyhow::Result<Option<ImpulseResponse>> {
    let path = match (path, dir) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) => {
            let candidates = list_impulses(dir)
                .with_context(|| format!("Cannot list impulse folder {}", dir.display()))?;
            let Some(selector) = pick else {
                return Ok(None);
            };
            select_impulse(&candidates, selector)
                .cloned()
                .with_context(|| {
                    format!(
                        "No impulse '{}' in {} ({} available). Use 'echora impulses {}' to list them.",
                        selector,
                        dir.display(),
                        candidates.len(),
                        dir.display()
                    )
                })?
        }
        (None, None) => return Ok(None),
    };

    let ir = load_impulse(&path)
        .with_context(|| format!("Failed to load impulse {}", path.display()))?;
    tracing::info!(
        impulse = %path.display(),
        taps = ir.len(),
        sample_rate = ir.sample_rate(),
        "impulse loaded"
    );
    Ok(Some(ir))
}

/// Transformer honouring the silent-result policy.
pub fn transformer(reject_silence: bool) -> AudioTransformer {
    let policy = if reject_silence {
        SilencePolicy::Reject
    } else {
        SilencePolicy::Passthrough
    };
    AudioTransformer::new(ConvolutionEngine::new().with_silence_policy(policy))
}

/// Transformer configured by `settings`.
pub fn transformer_for(settings: &EffectSettings) -> AudioTransformer {
    transformer(settings.silence_policy() == SilencePolicy::Reject)
}

/// WAV codec writing `bit_depth`.
pub fn codec(bit_depth: u16) -> anyhow::Result<WavCodec> {
    Ok(WavCodec::new(bit_depth)?)
}

/// Progress bar style shared by long-running commands.
pub fn progress_style() -> anyhow::Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
        .progress_chars("##-"))
}
