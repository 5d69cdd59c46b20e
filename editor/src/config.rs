//! Configuration constants
//!
//! Field names, discriminants and defaults of the wallpaper engine's
//! `config.json` format. Values must match the engine exactly.

// ===== Document layout =====

/// File name of the config document inside a wallpaper directory
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const KEY_NOTES: &str = "notes";
pub const KEY_MESHES: &str = "meshes";
pub const KEY_EFFECT_LIBRARY: &str = "specialEffectLibrary";
pub const KEY_TRIGGERS: &str = "specialEffectTriggers";

// ===== Effect library =====

pub const KEY_EFFECT_TYPE: &str = "type";
pub const KEY_EFFECT_TEXT: &str = "text";
pub const KEY_EFFECT_AUDIO: &str = "audioFileName";
pub const KEY_EFFECT_LOOP: &str = "loop";

/// Discriminant value identifying an alarm effect
pub const ALARM_EFFECT_KIND: i64 = 6;

// ===== Time triggers =====

pub const KEY_TRIGGER_TIME: &str = "triggerAtSecondOfDay";
pub const KEY_TRIGGER_EFFECTS: &str = "effectIndices";

/// Added to the time of day to mark a trigger as disabled.
/// Must stay above the largest valid time of day.
pub const DISABLED_OFFSET: u32 = 100_000;

/// Number of seconds in one day; valid times are `0..SECONDS_PER_DAY`
pub const SECONDS_PER_DAY: u32 = 86_400;

// ===== Defaults for new alarm effects =====

/// Visual layout fields written on every newly created alarm effect, in order.
pub const DEFAULT_ALARM_IMAGE: &str = "dhk.png";
pub const DEFAULT_ALARM_INITIAL_SCALE: f64 = 0.5;
pub const DEFAULT_ALARM_FINAL_SCALE: i64 = 1;
pub const DEFAULT_ALARM_INITIAL_ROTATION: i64 = 90;
pub const DEFAULT_ALARM_FINAL_ROTATION: i64 = 0;
pub const DEFAULT_ALARM_ALIGN_LEFT_PERCENT: f64 = 0.52;
pub const DEFAULT_ALARM_ALIGN_RIGHT_PERCENT: i64 = -1;
pub const DEFAULT_ALARM_VERTICAL_FROM_BOTTOM_PERCENT: i64 = 85;
pub const DEFAULT_ALARM_SCALE_DURATION_MS: i64 = 500;
pub const DEFAULT_ALARM_FADE_OUT_DURATION_MS: i64 = -1;

// ===== Notes =====

pub const KEY_NOTE_VISIBLE: &str = "visible";
pub const KEY_NOTE_TEXT: &str = "text";
pub const KEY_NOTE_BACKGROUND: &str = "backgroundImage";
pub const KEY_NOTE_SCALE: &str = "scale";

pub const DEFAULT_NOTE_BACKGROUND: &str = "note.png";
pub const DEFAULT_NOTE_SCALE: f64 = 0.5;

// ===== Audio =====

/// Extension (lowercase, without dot) of selectable alarm sounds
pub const AUDIO_EXTENSION: &str = "mp3";
