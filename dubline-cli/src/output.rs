//! Writing results to disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::*;

/// Writes audio bytes to `path`, creating parent directories
pub async fn write_audio(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Wrote {} ({})",
        "✓".green(),
        path.display().to_string().cyan(),
        human_size(bytes.len()).dimmed()
    );

    Ok(())
}

/// Path of a per-language output inside `dir`, e.g. `dir/nicole.es.mp3`
pub fn language_output(dir: &Path, stem: &str, language: &str) -> PathBuf {
    dir.join(format!("{}.{}.mp3", stem, language))
}

/// File stem of an input name, without extension
pub fn stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
}

fn human_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
