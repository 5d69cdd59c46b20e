//! Trigger codec
//!
//! Time triggers store the time of day and the on/off state in one string
//! field: enabled alarms hold the plain second of day, disabled ones hold it
//! plus [`DISABLED_OFFSET`]. They share `specialEffectTriggers` with other
//! trigger kinds, which are split off and put back unmodified.

use crate::config::{DISABLED_OFFSET, KEY_TRIGGER_EFFECTS, KEY_TRIGGER_TIME};
use serde_json::{json, Map, Value};

/// Decoded `triggerAtSecondOfDay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime {
    pub seconds: u32,
    pub enabled: bool,
}

impl TriggerTime {
    pub fn new(seconds: u32, enabled: bool) -> Self {
        Self { seconds, enabled }
    }

    pub fn encode(self) -> String {
        encode(self.seconds, self.enabled)
    }
}

/// Encode a time of day and enabled flag into the stored string
pub fn encode(seconds: u32, enabled: bool) -> String {
    if enabled {
        seconds.to_string()
    } else {
        (seconds + DISABLED_OFFSET).to_string()
    }
}

/// Decode a stored time string.
///
/// Anything that is not a non-negative integer decodes as `0`, enabled.
pub fn decode_str(raw: &str) -> TriggerTime {
    let parsed = raw.trim().parse::<i64>().unwrap_or(0);
    decode_number(parsed)
}

/// Decode the raw field value; integers written by other tools are accepted too
pub fn decode(raw: &Value) -> TriggerTime {
    match raw {
        Value::String(s) => decode_str(s),
        Value::Number(n) => decode_number(n.as_i64().unwrap_or(0)),
        _ => decode_number(0),
    }
}

fn decode_number(parsed: i64) -> TriggerTime {
    let parsed = u32::try_from(parsed).unwrap_or(0);

    if parsed >= DISABLED_OFFSET {
        TriggerTime::new(parsed - DISABLED_OFFSET, false)
    } else {
        TriggerTime::new(parsed, true)
    }
}

/// Whether a trigger belongs to the alarm subsystem
pub fn is_time_trigger(trigger: &Value) -> bool {
    trigger
        .as_object()
        .map_or(false, |t| t.contains_key(KEY_TRIGGER_TIME))
}

/// The time triggers of a trigger array, in order
pub fn extract_time_triggers(all: &[Value]) -> Vec<Value> {
    all.iter().filter(|t| is_time_trigger(t)).cloned().collect()
}

/// Split a trigger array into `(non_time, time)`, keeping relative order
pub fn split(all: Vec<Value>) -> (Vec<Value>, Vec<Value>) {
    all.into_iter().partition(|t| !is_time_trigger(t))
}

/// Concatenate non-time triggers first, then time triggers.
///
/// Applying this to its own output is a no-op, so repeated saves produce
/// the same array.
pub fn rebuild(non_time: Vec<Value>, time: Vec<Value>) -> Vec<Value> {
    let mut all = non_time;
    all.extend(time);
    all
}

/// Replace every time trigger in `all` with `time`
pub fn replace_time_triggers(all: &mut Vec<Value>, time: Vec<Value>) {
    let (non_time, _) = split(std::mem::take(all));
    *all = rebuild(non_time, time);
}

/// First effect reference of a trigger.
///
/// A reference may itself be a list, in which case its first element counts.
pub fn first_effect_index(trigger: &Value) -> Option<usize> {
    let first = trigger.get(KEY_TRIGGER_EFFECTS)?.as_array()?.first()?;

    let index = match first {
        Value::Array(nested) => nested.first()?.as_u64()?,
        other => other.as_u64()?,
    };

    usize::try_from(index).ok()
}

/// A fresh time trigger pointing at one library position
pub fn new_time_trigger(time: TriggerTime, effect_index: usize) -> Value {
    json!({
        KEY_TRIGGER_TIME: time.encode(),
        KEY_TRIGGER_EFFECTS: [effect_index],
    })
}

/// Overwrite time and reference of an existing trigger, keeping its other keys
pub fn apply(trigger: &mut Map<String, Value>, time: TriggerTime, effect_index: usize) {
    trigger.insert(KEY_TRIGGER_TIME.to_string(), Value::String(time.encode()));
    trigger.insert(KEY_TRIGGER_EFFECTS.to_string(), json!([effect_index]));
}
