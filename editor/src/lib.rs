//! wallnotes library
//!
//! Editing core for the alarms and notes stored in a wallpaper engine's
//! `config.json`, exposed for the command-line tool and for tests.

pub mod app;
pub mod clock;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod projection;
pub mod services;
pub mod trigger;

pub use app::EditorSession;
pub use error::{AppError, Result};
