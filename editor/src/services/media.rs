//! Alarm sound lookup
//!
//! Lists the sound files an alarm can reference. Playback is left to the
//! caller.

use crate::config::AUDIO_EXTENSION;
use crate::error::Result;
use std::path::Path;
use tokio::fs;

/// File names (without directory) of the sounds in `dir`, sorted.
///
/// A missing directory has no sounds.
pub async fn find_audio_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(&path) {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            files.push(name.to_string());
        }
    }

    files.sort();

    tracing::debug!("Found {} sound files in {:?}", files.len(), dir);

    Ok(files)
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION))
}
