//! Note commands

use super::print_json;
use crate::app::EditorSession;
use crate::error::Result;
use crate::models::{NoteForm, NoteView};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// List all notes
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a note
    Add {
        text: String,
        /// Keep the note off screen
        #[arg(long)]
        hidden: bool,
    },
    /// Change a note; omitted options keep their value
    Edit {
        index: usize,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        visible: Option<bool>,
    },
    /// Delete a note
    Delete { index: usize },
}

pub async fn run(session: &mut EditorSession, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::List { json } => {
            let notes = session.notes();
            if json {
                return print_json(&notes);
            }
            for note in &notes {
                println!("{}", note_line(note));
            }
        }
        NoteCommand::Add { text, hidden } => {
            let form = NoteForm {
                visible: !hidden,
                text,
            };
            let index = session.add_note(&form)?;
            session.save_notes().await?;
            println!("{}", note_line(&session.note(index)?));
        }
        NoteCommand::Edit {
            index,
            text,
            visible,
        } => {
            let current = session.note(index)?;
            let form = NoteForm {
                visible: visible.unwrap_or(current.visible),
                text: text.unwrap_or(current.text),
            };
            session.update_note(index, &form)?;
            session.save_notes().await?;
            println!("{}", note_line(&session.note(index)?));
        }
        NoteCommand::Delete { index } => {
            let removed = session.remove_note(index)?;
            session.save_notes().await?;
            println!("Deleted note: {}", first_line(&removed.text));
        }
    }

    Ok(())
}

/// Index, visibility and the first line of the text
pub fn note_line(note: &NoteView) -> String {
    let status = if note.visible { "shown " } else { "hidden" };
    format!("{:>3}  {} {}", note.index, status, first_line(&note.text))
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_line_shows_first_line() {
        let note = NoteView {
            index: 2,
            visible: false,
            text: "groceries\nmilk\neggs".to_string(),
            background_image: None,
            scale: None,
        };

        assert_eq!(note_line(&note), "  2  hidden groceries");
    }
}
