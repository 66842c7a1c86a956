//! List impulse responses available in a folder.

use clap::Args;
use echora_io::{list_impulses, read_wav_info};
use std::path::PathBuf;

/// List impulse responses in a folder.
#[derive(Args)]
pub struct ImpulsesArgs {
    /// Folder to scan for WAV files
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

/// Run the impulses command.
pub fn run(args: ImpulsesArgs) -> anyhow::Result<()> {
    let impulses = list_impulses(&args.dir)?;

    if impulses.is_empty() {
        println!("No impulse responses found in {}", args.dir.display());
        return Ok(());
    }

    println!("Impulse responses in {}:\n", args.dir.display());
    for (i, path) in impulses.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match read_wav_info(path) {
            Ok(info) => println!(
                "  {:>2}. {:<32} {:>7.2}s  {} Hz  {} ch",
                i + 1,
                name,
                info.duration_secs,
                info.sample_rate,
                info.channels
            ),
            Err(e) => println!("  {:>2}. {:<32} (unreadable: {e})", i + 1, name),
        }
    }

    println!("\nSelect one with --impulse-dir {} --pick <N|NAME>", args.dir.display());
    Ok(())
}
