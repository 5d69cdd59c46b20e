//! Index projection over the effect library
//!
//! Maps between a position in the filtered subsequence of matching entries
//! (a "slot") and the absolute position in the full library. A projection is
//! a snapshot: any insert or remove on the library shifts absolute positions,
//! so callers build a new one after every structural change instead of
//! patching an old one.

use crate::config::{ALARM_EFFECT_KIND, KEY_EFFECT_TYPE};
use serde_json::Value;
use std::collections::HashMap;

/// Two-way slot/absolute mapping for one library snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    slots: Vec<usize>,
    inverse: HashMap<usize, usize>,
}

impl Projection {
    /// Project `library` onto the entries accepted by `matches`.
    ///
    /// The Nth matching entry met scanning from position 0 gets slot N.
    pub fn build<F>(library: &[Value], matches: F) -> Self
    where
        F: Fn(&Value) -> bool,
    {
        let slots: Vec<usize> = library
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches(entry))
            .map(|(absolute, _)| absolute)
            .collect();

        let inverse = slots
            .iter()
            .enumerate()
            .map(|(slot, &absolute)| (absolute, slot))
            .collect();

        Self { slots, inverse }
    }

    /// Project onto alarm effects
    pub fn alarms(library: &[Value]) -> Self {
        Self::build(library, is_alarm_effect)
    }

    /// Absolute library position of a slot
    pub fn absolute(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    /// Slot of an absolute position, if that position holds a matching entry
    pub fn slot_of(&self, absolute: usize) -> Option<usize> {
        self.inverse.get(&absolute).copied()
    }
}

/// Whether a library entry is an alarm effect (`type == 6`).
///
/// Compared numerically so `6.0` written by other tools still counts.
pub fn is_alarm_effect(entry: &Value) -> bool {
    entry
        .get(KEY_EFFECT_TYPE)
        .and_then(Value::as_f64)
        .map_or(false, |kind| kind == ALARM_EFFECT_KIND as f64)
}
