//! Alarms service
//!
//! Reconciles the alarm view with the two raw arrays it is built from: the
//! alarm effects in `specialEffectLibrary` and the time triggers in
//! `meshes[0].specialEffectTriggers`, which point at effects by absolute
//! library position.
//!
//! Views remember their effect by slot (position among alarm effects). Every
//! write goes through a projection built from the library as it is right
//! now, and the view is re-derived from the document after each mutation.

use crate::clock::parse_clock;
use crate::config::{
    ALARM_EFFECT_KIND, DEFAULT_ALARM_ALIGN_LEFT_PERCENT, DEFAULT_ALARM_ALIGN_RIGHT_PERCENT,
    DEFAULT_ALARM_FADE_OUT_DURATION_MS, DEFAULT_ALARM_FINAL_ROTATION, DEFAULT_ALARM_FINAL_SCALE,
    DEFAULT_ALARM_IMAGE, DEFAULT_ALARM_INITIAL_ROTATION, DEFAULT_ALARM_INITIAL_SCALE,
    DEFAULT_ALARM_SCALE_DURATION_MS, DEFAULT_ALARM_VERTICAL_FROM_BOTTOM_PERCENT, KEY_EFFECT_AUDIO,
    KEY_EFFECT_LOOP, KEY_EFFECT_TEXT, KEY_EFFECT_TYPE, KEY_TRIGGER_EFFECTS, KEY_TRIGGER_TIME,
};
use crate::document::{Document, DocumentStore};
use crate::error::{AppError, Result};
use crate::models::{AlarmForm, AlarmView};
use crate::projection::Projection;
use crate::trigger::{self, TriggerTime};
use serde_json::{json, Map, Value};

/// Where the alarm editor is in its edit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    /// `None` while creating a new alarm, `Some(i)` while editing alarm `i`
    Editing(Option<usize>),
}

/// Service for managing alarms of one document
#[derive(Debug, Clone)]
pub struct AlarmService {
    store: DocumentStore,
    alarms: Vec<AlarmView>,
    state: EditState,
}

impl AlarmService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            alarms: Vec::new(),
            state: EditState::Viewing,
        }
    }

    /// Derive the alarm view from the document, dropping any edit in progress
    pub fn load(&mut self, doc: &Document) -> &[AlarmView] {
        self.alarms = derive_alarms(doc);
        self.state = EditState::Viewing;
        tracing::debug!("Loaded {} alarms", self.alarms.len());
        &self.alarms
    }

    /// List all alarms
    pub fn alarms(&self) -> &[AlarmView] {
        &self.alarms
    }

    /// Get an alarm by position in the view
    pub fn get(&self, index: usize) -> Result<&AlarmView> {
        self.alarms
            .get(index)
            .ok_or(AppError::AlarmNotFound(index))
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Start editing a new alarm
    pub fn begin_create(&mut self) -> AlarmForm {
        self.state = EditState::Editing(None);
        AlarmForm::new("00:00", "")
    }

    /// Start editing an existing alarm, returning its current values
    pub fn begin_edit(&mut self, index: usize) -> Result<AlarmForm> {
        let form = AlarmForm::from(self.get(index)?);
        self.state = EditState::Editing(Some(index));
        Ok(form)
    }

    /// Abandon the edit in progress
    pub fn cancel(&mut self) {
        self.state = EditState::Viewing;
    }

    /// Apply the edit in progress.
    ///
    /// On rejected input the edit stays open and nothing is changed.
    /// Returns the position of the created or edited alarm.
    pub fn commit(&mut self, doc: &mut Document, form: &AlarmForm) -> Result<usize> {
        let target = match self.state {
            EditState::Viewing => return Err(AppError::NotEditing),
            EditState::Editing(target) => target,
        };

        let index = match target {
            None => self.create(doc, form)?,
            Some(index) => {
                self.update(doc, index, form)?;
                index
            }
        };

        self.state = EditState::Viewing;
        Ok(index)
    }

    /// Create a new alarm, returning its position in the view
    pub fn create(&mut self, doc: &mut Document, form: &AlarmForm) -> Result<usize> {
        let seconds = parse_clock(&form.time)?;
        let time = TriggerTime::new(seconds, form.enabled);

        if !doc.can_store_triggers() {
            return Err(AppError::InvalidDocument(
                "no mesh available to hold alarm triggers".to_string(),
            ));
        }

        tracing::info!("Creating alarm {:?} at {}", form.name, form.time);

        let library = doc.effect_library_mut()?;
        library.push(new_alarm_effect(form));
        let effect_index = library.len() - 1;

        let effect_slot = Projection::alarms(doc.effect_library())
            .slot_of(effect_index)
            .ok_or_else(|| {
                AppError::InvalidDocument("new alarm effect is not an alarm".to_string())
            })?;

        let trigger = match trigger::new_time_trigger(time, effect_index) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        self.alarms.push(AlarmView {
            seconds,
            enabled: form.enabled,
            name: form.name.clone(),
            audio_file: form.audio().unwrap_or_default().to_string(),
            loop_audio: form.loop_audio,
            effect_slot,
            effect_index,
            trigger_slot: self.alarms.len(),
            trigger,
        });

        self.write_back(doc)?;
        self.alarms = derive_alarms(doc);

        tracing::debug!("Alarm effect appended at library position {}", effect_index);

        Ok(self.alarms.len().saturating_sub(1))
    }

    /// Update an alarm in place.
    ///
    /// Only `text`, `audioFileName` and `loop` of the effect are touched; every
    /// other field keeps its value and position.
    pub fn update(&mut self, doc: &mut Document, index: usize, form: &AlarmForm) -> Result<()> {
        let seconds = parse_clock(&form.time)?;
        let mut view = self.get(index)?.clone();

        let effect_index = Projection::alarms(doc.effect_library())
            .absolute(view.effect_slot)
            .ok_or(AppError::AlarmNotFound(index))?;

        tracing::debug!("Updating alarm {} (library position {})", index, effect_index);

        if let Some(effect) = doc.effect_library_mut()?[effect_index].as_object_mut() {
            apply_form(effect, form);
        }

        view.seconds = seconds;
        view.enabled = form.enabled;
        view.name = form.name.clone();
        view.audio_file = form.audio().unwrap_or_default().to_string();
        view.loop_audio = form.loop_audio;
        view.effect_index = effect_index;
        let time = view.time();
        trigger::apply(&mut view.trigger, time, effect_index);
        self.alarms[index] = view;

        self.write_back(doc)?;
        self.alarms = derive_alarms(doc);

        Ok(())
    }

    /// Delete an alarm: its trigger first, then its effect.
    ///
    /// The trigger is found by value rather than position. Returns the
    /// removed view. Any edit in progress is dropped.
    pub fn delete(&mut self, doc: &mut Document, index: usize) -> Result<AlarmView> {
        let removed = self.get(index)?.clone();

        tracing::info!("Deleting alarm {} ({:?})", index, removed.name);

        if doc.can_store_triggers() {
            let triggers = doc.triggers_mut()?;
            if let Some(pos) = triggers
                .iter()
                .position(|t| same_trigger(t, &removed.trigger))
            {
                triggers.remove(pos);
            }
        }

        let effect_index = Projection::alarms(doc.effect_library()).absolute(removed.effect_slot);

        self.alarms.remove(index);

        match effect_index {
            Some(effect_index) => {
                doc.effect_library_mut()?.remove(effect_index);

                // Alarm effects after the removed one each moved down one slot
                let slot = removed.effect_slot;
                self.alarms.retain(|view| view.effect_slot != slot);
                for view in &mut self.alarms {
                    if view.effect_slot > slot {
                        view.effect_slot -= 1;
                    }
                }
            }
            None => tracing::warn!(
                "Alarm effect slot {} no longer exists; only the trigger was removed",
                removed.effect_slot
            ),
        }

        self.write_back(doc)?;
        self.alarms = derive_alarms(doc);
        self.state = EditState::Viewing;

        Ok(removed)
    }

    /// Persist the alarms.
    ///
    /// Triggers are regenerated from a fresh projection. An alarm whose slot
    /// no longer resolves is left out of the file rather than failing the
    /// save. On a write error the in-memory document is left as it was.
    pub async fn save(&mut self, doc: &mut Document) -> Result<()> {
        let mut staged = doc.clone();
        let written = self.write_back(&mut staged)?;

        self.store.save(&staged).await?;

        *doc = staged;
        self.alarms = derive_alarms(doc);
        self.state = EditState::Viewing;

        tracing::info!("Saved {} alarms", written);

        Ok(())
    }

    /// Regenerate the time triggers from the views, returning how many were written
    fn write_back(&self, doc: &mut Document) -> Result<usize> {
        if !doc.can_store_triggers() {
            if self.alarms.is_empty() {
                return Ok(0);
            }
            return Err(AppError::InvalidDocument(
                "no mesh available to hold alarm triggers".to_string(),
            ));
        }

        let projection = Projection::alarms(doc.effect_library());
        let mut time_triggers = Vec::with_capacity(self.alarms.len());

        for view in &self.alarms {
            match projection.absolute(view.effect_slot) {
                Some(effect_index) => {
                    let mut trigger = view.trigger.clone();
                    trigger::apply(&mut trigger, view.time(), effect_index);
                    time_triggers.push(Value::Object(trigger));
                }
                None => tracing::warn!(
                    "Dropping alarm {:?}: effect slot {} no longer resolves",
                    view.name,
                    view.effect_slot
                ),
            }
        }

        let written = time_triggers.len();
        trigger::replace_time_triggers(doc.triggers_mut()?, time_triggers);

        Ok(written)
    }
}

/// Build the alarm view from the document.
///
/// Time triggers whose first reference is not an alarm effect are skipped.
pub fn derive_alarms(doc: &Document) -> Vec<AlarmView> {
    let library = doc.effect_library();
    let projection = Projection::alarms(library);
    let mut alarms = Vec::new();

    let time_triggers = doc.triggers().iter().filter(|t| trigger::is_time_trigger(t));

    for (trigger_slot, raw) in time_triggers.enumerate() {
        let Some(map) = raw.as_object() else {
            continue;
        };

        let time = map
            .get(KEY_TRIGGER_TIME)
            .map(trigger::decode)
            .unwrap_or_else(|| TriggerTime::new(0, true));

        let resolved = trigger::first_effect_index(raw)
            .and_then(|index| projection.slot_of(index).map(|slot| (index, slot)));

        let Some((effect_index, effect_slot)) = resolved else {
            tracing::debug!("Skipping time trigger {} without an alarm effect", trigger_slot);
            continue;
        };

        let effect = &library[effect_index];

        alarms.push(AlarmView {
            seconds: time.seconds,
            enabled: time.enabled,
            name: str_field(effect, KEY_EFFECT_TEXT),
            audio_file: str_field(effect, KEY_EFFECT_AUDIO),
            loop_audio: effect
                .get(KEY_EFFECT_LOOP)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            effect_slot,
            effect_index,
            trigger_slot,
            trigger: map.clone(),
        });
    }

    alarms
}

/// A new alarm effect with the default layout
fn new_alarm_effect(form: &AlarmForm) -> Value {
    let mut effect = json!({
        KEY_EFFECT_TYPE: ALARM_EFFECT_KIND,
        "image1FileName": DEFAULT_ALARM_IMAGE,
        "initialScale": DEFAULT_ALARM_INITIAL_SCALE,
        "finalScale": DEFAULT_ALARM_FINAL_SCALE,
        "initialRotation": DEFAULT_ALARM_INITIAL_ROTATION,
        "finalRotation": DEFAULT_ALARM_FINAL_ROTATION,
        "alignLeftPercent": DEFAULT_ALARM_ALIGN_LEFT_PERCENT,
        "alignRightPercent": DEFAULT_ALARM_ALIGN_RIGHT_PERCENT,
        "verticalFromBottomPercent": DEFAULT_ALARM_VERTICAL_FROM_BOTTOM_PERCENT,
        KEY_EFFECT_TEXT: form.name,
        "scaleDuration": DEFAULT_ALARM_SCALE_DURATION_MS,
        "fadeOutDuration": DEFAULT_ALARM_FADE_OUT_DURATION_MS,
    });

    if let Some(effect) = effect.as_object_mut() {
        if let Some(audio) = form.audio() {
            effect.insert(KEY_EFFECT_AUDIO.to_string(), Value::String(audio.to_string()));
        }
        if form.loop_audio {
            effect.insert(KEY_EFFECT_LOOP.to_string(), Value::Bool(true));
        }
    }

    effect
}

/// Write the user-editable fields onto an effect.
///
/// "No sound" and "no loop" are written as absent keys.
fn apply_form(effect: &mut Map<String, Value>, form: &AlarmForm) {
    effect.insert(KEY_EFFECT_TEXT.to_string(), Value::String(form.name.clone()));

    match form.audio() {
        Some(audio) => {
            effect.insert(KEY_EFFECT_AUDIO.to_string(), Value::String(audio.to_string()));
        }
        None => {
            effect.shift_remove(KEY_EFFECT_AUDIO);
        }
    }

    if form.loop_audio {
        effect.insert(KEY_EFFECT_LOOP.to_string(), Value::Bool(true));
    } else {
        effect.shift_remove(KEY_EFFECT_LOOP);
    }
}

fn same_trigger(candidate: &Value, stored: &Map<String, Value>) -> bool {
    candidate.get(KEY_TRIGGER_TIME) == stored.get(KEY_TRIGGER_TIME)
        && candidate.get(KEY_TRIGGER_EFFECTS) == stored.get(KEY_TRIGGER_EFFECTS)
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
