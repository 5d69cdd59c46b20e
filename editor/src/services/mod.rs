//! Services module
//!
//! Editing logic that sits between the session and the raw document.

pub mod alarms;
pub mod media;
pub mod notes;

pub use alarms::{AlarmService, EditState};
pub use notes::NoteService;
