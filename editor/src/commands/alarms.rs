//! Alarm commands

use super::print_json;
use crate::app::EditorSession;
use crate::error::Result;
use crate::models::{AlarmForm, AlarmView};
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum AlarmCommand {
    /// List all alarms
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new alarm
    Add(NewAlarmArgs),
    /// Change an existing alarm; omitted options keep their value
    Edit {
        index: usize,
        #[command(flatten)]
        changes: AlarmChanges,
    },
    /// Delete an alarm
    Delete { index: usize },
}

#[derive(Debug, Args)]
pub struct NewAlarmArgs {
    /// Time of day, HH:MM
    #[arg(long)]
    pub time: String,
    /// Text shown when the alarm fires
    #[arg(long, default_value = "")]
    pub name: String,
    /// Sound file in the config directory
    #[arg(long)]
    pub audio: Option<String>,
    /// Repeat the sound until dismissed
    #[arg(long = "loop")]
    pub loop_audio: bool,
    /// Create the alarm switched off
    #[arg(long)]
    pub disabled: bool,
}

impl From<NewAlarmArgs> for AlarmForm {
    fn from(args: NewAlarmArgs) -> Self {
        Self {
            time: args.time,
            enabled: !args.disabled,
            name: args.name,
            audio_file: args.audio,
            loop_audio: args.loop_audio,
        }
    }
}

#[derive(Debug, Args)]
pub struct AlarmChanges {
    /// Time of day, HH:MM
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// Sound file; an empty value removes the sound
    #[arg(long)]
    pub audio: Option<String>,
    #[arg(long = "loop")]
    pub loop_audio: Option<bool>,
    #[arg(long)]
    pub enabled: Option<bool>,
}

impl AlarmChanges {
    fn apply(self, form: &mut AlarmForm) {
        if let Some(time) = self.time {
            form.time = time;
        }
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(audio) = self.audio {
            form.audio_file = Some(audio);
        }
        if let Some(loop_audio) = self.loop_audio {
            form.loop_audio = loop_audio;
        }
        if let Some(enabled) = self.enabled {
            form.enabled = enabled;
        }
    }
}

pub async fn run(session: &mut EditorSession, command: AlarmCommand) -> Result<()> {
    match command {
        AlarmCommand::List { json } => {
            if json {
                return print_json(session.alarms());
            }
            for (index, alarm) in session.alarms().iter().enumerate() {
                println!("{:>3}  {}", index, alarm_line(alarm));
            }
        }
        AlarmCommand::Add(args) => {
            let index = session.add_alarm(&args.into())?;
            session.save().await?;
            println!("Added alarm {}: {}", index, alarm_line(session.alarm(index)?));
        }
        AlarmCommand::Edit { index, changes } => {
            let mut form = session.begin_alarm_edit(index)?;
            changes.apply(&mut form);
            if let Err(e) = session.commit_alarm_edit(&form) {
                session.cancel_alarm_edit();
                return Err(e);
            }
            session.save().await?;
            println!("Updated alarm {}: {}", index, alarm_line(session.alarm(index)?));
        }
        AlarmCommand::Delete { index } => {
            let removed = session.delete_alarm(index)?;
            session.save().await?;
            println!("Deleted alarm: {}", alarm_line(&removed));
        }
    }

    Ok(())
}

/// One-line summary: status, time, name and sound
pub fn alarm_line(alarm: &AlarmView) -> String {
    let status = if alarm.enabled { "on " } else { "off" };
    let name = if alarm.name.is_empty() {
        "(unnamed)"
    } else {
        alarm.name.as_str()
    };

    let mut line = format!("{} {} - {}", status, alarm.clock(), name);
    if let Some(audio) = alarm.audio() {
        line.push_str(&format!(" [{}{}]", audio, if alarm.loop_audio { ", loop" } else { "" }));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn view(name: &str, audio: &str, enabled: bool, loop_audio: bool) -> AlarmView {
        AlarmView {
            seconds: 29100,
            enabled,
            name: name.to_string(),
            audio_file: audio.to_string(),
            loop_audio,
            effect_slot: 0,
            effect_index: 0,
            trigger_slot: 0,
            trigger: Map::new(),
        }
    }

    #[test]
    fn test_alarm_line() {
        assert_eq!(alarm_line(&view("Wake", "", true, false)), "on  08:05 - Wake");
        assert_eq!(alarm_line(&view("", "", false, true)), "off 08:05 - (unnamed)");
        assert_eq!(
            alarm_line(&view("Wake", "bell.mp3", true, true)),
            "on  08:05 - Wake [bell.mp3, loop]"
        );
    }

    #[test]
    fn test_changes_only_touch_given_fields() {
        let mut form = AlarmForm::from(&view("Wake", "bell.mp3", true, true));
        let changes = AlarmChanges {
            time: None,
            name: Some("Up".to_string()),
            audio: Some(String::new()),
            loop_audio: None,
            enabled: Some(false),
        };

        changes.apply(&mut form);

        assert_eq!(form.time, "08:05");
        assert_eq!(form.name, "Up");
        assert_eq!(form.audio(), None);
        assert!(form.loop_audio);
        assert!(!form.enabled);
    }
}
