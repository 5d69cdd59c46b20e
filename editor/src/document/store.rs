//! Config file persistence
//!
//! Loads `config.json` into a [`Document`] and writes it back atomically:
//! the new content goes to a temp file next to the target, which is then
//! renamed over it.

use super::Document;
use crate::config::CONFIG_FILE_NAME;
use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Reads and writes one config document
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store for the `config.json` inside a wallpaper directory
    pub fn for_directory(dir: &Path) -> Self {
        Self::new(dir.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the config file (where alarm sounds live)
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Load and parse the document
    pub async fn load(&self) -> Result<Document> {
        if !self.path.is_file() {
            return Err(AppError::DocumentMissing(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).await?;
        let document = Document::parse(&content)?;

        tracing::info!("Loaded config from {:?}", self.path);

        Ok(document)
    }

    /// Write the document to disk
    pub async fn save(&self, document: &Document) -> Result<()> {
        let content = document.to_pretty_string()?;
        let temp_path = self.temp_path();

        if let Err(source) = write_file(&temp_path, content.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(AppError::Persistence {
                path: self.path.clone(),
                source,
            });
        }

        if let Err(source) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(AppError::Persistence {
                path: self.path.clone(),
                source,
            });
        }

        tracing::info!("Config saved to {:?}", self.path);

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CONFIG_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
