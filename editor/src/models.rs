//! Editor models
//!
//! View records derived from the document, and the forms callers submit to
//! change it. Views serialize for display; forms carry raw user input.

use crate::clock::format_clock;
use crate::trigger::TriggerTime;
use serde::Serialize;
use serde_json::{Map, Value};

/// One alarm as the user sees it, joined from a time trigger and the alarm
/// effect it references
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmView {
    /// Second of day, `0..86400`
    pub seconds: u32,
    pub enabled: bool,
    pub name: String,
    /// Sound file name, empty when the alarm is silent
    pub audio_file: String,
    pub loop_audio: bool,
    /// Position among alarm effects only
    pub effect_slot: usize,
    /// Position in the full effect library when this view was derived
    pub effect_index: usize,
    /// Position among time triggers only
    pub trigger_slot: usize,
    /// Copy of the raw trigger, used to find it again by value
    #[serde(skip)]
    pub trigger: Map<String, Value>,
}

impl AlarmView {
    pub fn time(&self) -> TriggerTime {
        TriggerTime::new(self.seconds, self.enabled)
    }

    /// `HH:MM`
    pub fn clock(&self) -> String {
        format_clock(self.seconds)
    }

    pub fn audio(&self) -> Option<&str> {
        non_empty(&self.audio_file)
    }
}

/// Alarm fields as entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmForm {
    /// `HH:MM`
    pub time: String,
    pub enabled: bool,
    pub name: String,
    pub audio_file: Option<String>,
    pub loop_audio: bool,
}

impl AlarmForm {
    pub fn new(time: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            enabled: true,
            name: name.into(),
            audio_file: None,
            loop_audio: false,
        }
    }

    /// Sound file, ignoring blank entries
    pub fn audio(&self) -> Option<&str> {
        self.audio_file.as_deref().and_then(non_empty)
    }
}

impl From<&AlarmView> for AlarmForm {
    fn from(view: &AlarmView) -> Self {
        Self {
            time: view.clock(),
            enabled: view.enabled,
            name: view.name.clone(),
            audio_file: view.audio().map(str::to_string),
            loop_audio: view.loop_audio,
        }
    }
}

/// A note as the user sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteView {
    pub index: usize,
    pub visible: bool,
    pub text: String,
    pub background_image: Option<String>,
    pub scale: Option<f64>,
}

/// Note fields as entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    pub visible: bool,
    pub text: String,
}

impl NoteForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            visible: true,
            text: text.into(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
