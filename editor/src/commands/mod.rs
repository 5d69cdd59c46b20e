//! Command-line commands
//!
//! This module organizes commands into logical submodules:
//! - `alarms`: alarm listing and editing
//! - `notes`: note listing and editing
//!
//! Every command that changes the document saves it before returning.

pub mod alarms;
pub mod notes;

pub use alarms::AlarmCommand;
pub use notes::NoteCommand;

use crate::app::EditorSession;
use crate::error::{AppError, Result};
use serde::Serialize;

/// List the sound files next to the config
pub async fn list_audio(session: &EditorSession) -> Result<()> {
    let files = session.audio_choices().await?;

    if files.is_empty() {
        println!("No sound files in {}", session.directory().display());
    }
    for file in files {
        println!("{}", file);
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(AppError::Serialization)?;
    println!("{}", text);
    Ok(())
}
