//! Render an effect to a temporary file and play it.

use super::common::{self, EchoOpts, ImpulseOpts, Mode};
use anyhow::Context;
use clap::Args;
use echora_io::{AudioCodec, TempRender, WavCodec};
use std::path::PathBuf;
use std::process::Command;

/// Render to a temporary file and play it with an external player.
#[derive(Args)]
pub struct PreviewArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Effect to preview (inferred from the other flags when omitted)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    #[command(flatten)]
    echo: EchoOpts,

    #[command(flatten)]
    impulse: ImpulseOpts,

    /// Player command; the rendered file path is appended as the last argument
    #[arg(long, value_name = "CMD")]
    player: Option<String>,
}

/// Run the preview command.
pub fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let settings = common::effect_settings(args.mode, &args.echo, &args.impulse, None)?;
    let mode = common::effect_mode(&settings)?;
    mode.validate()?;

    let input = WavCodec::default().read(&args.input)?;
    let output = common::transformer_for(&settings).transform(&input, &mode)?;

    let render = TempRender::new(&output, 16)?;
    tracing::debug!(path = %render.path().display(), "preview rendered");

    let player = args.player.unwrap_or_else(|| default_player().to_string());
    let mut words = player.split_whitespace();
    let program = words.next().context("Empty --player command")?;

    println!(
        "Playing {} ({:.2}s)...",
        args.input.display(),
        output.duration_secs()
    );
    let status = Command::new(program)
        .args(words)
        .arg(render.path())
        .status()
        .with_context(|| format!("Failed to launch player '{program}'"));

    // The render is removed whether or not the player ran.
    render.release()?;

    let status = status?;
    if !status.success() {
        anyhow::bail!("Player '{}' exited with {}", program, status);
    }
    Ok(())
}

fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "aplay"
    }
}
