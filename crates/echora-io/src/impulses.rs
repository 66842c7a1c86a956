//! Impulse-response libraries on disk.
//!
//! An impulse folder is any directory of WAV files. [`list_impulses`]
//! returns the candidates in a stable order; [`select_impulse`] resolves a
//! user choice (1-based index or file stem) against that list.

use crate::Result;
use crate::wav::read_audio;
use echora_core::ImpulseResponse;
use std::path::{Path, PathBuf};

/// File extensions recognised as impulse-response audio.
const AUDIO_EXTENSIONS: &[&str] = &["wav", "wave"];

/// Check whether `path` has a recognised audio extension (case-insensitive).
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// List audio files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched.
pub fn list_impulses<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut impulses = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && is_audio_file(&path) {
            impulses.push(path);
        }
    }
    impulses.sort();
    tracing::debug!(
        dir = %dir.as_ref().display(),
        count = impulses.len(),
        "listed impulses"
    );
    Ok(impulses)
}

/// Resolve `selector` against a candidate list.
///
/// A selector that parses as a number is a 1-based index; anything else
/// matches a file stem exactly, then case-insensitively.
pub fn select_impulse<'a>(candidates: &'a [PathBuf], selector: &str) -> Option<&'a PathBuf> {
    if let Ok(index) = selector.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| candidates.get(i));
    }
    candidates
        .iter()
        .find(|p| file_stem(p) == Some(selector))
        .or_else(|| {
            candidates
                .iter()
                .find(|p| file_stem(p).is_some_and(|s| s.eq_ignore_ascii_case(selector)))
        })
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Read an impulse-response file, averaging stereo to mono.
pub fn load_impulse<P: AsRef<Path>>(path: P) -> Result<ImpulseResponse> {
    let (buffer, _) = read_audio(path)?;
    Ok(ImpulseResponse::from_buffer(&buffer)?)
}
