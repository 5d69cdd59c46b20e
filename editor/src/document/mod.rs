//! Document module
//!
//! This module owns the raw configuration tree:
//! - `Document`: the parsed `config.json` root with accessors for the
//!   arrays the editors work on
//! - `DocumentStore`: loading and saving the file

pub mod store;

pub use store::DocumentStore;

use crate::config::{KEY_EFFECT_LIBRARY, KEY_MESHES, KEY_NOTES, KEY_TRIGGERS};
use crate::error::{AppError, Result};
use serde_json::{Map, Value};

/// The parsed `config.json` root object.
///
/// Accessors hand out the canonical nested containers, so mutating what they
/// return mutates the document itself. Every key the editors do not know about
/// is carried through untouched, in its original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Wrap an already parsed value; the root must be a JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(AppError::InvalidDocument(format!(
                "expected an object at the root, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Parse document text
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(AppError::ParseFailure)?;
        Self::from_value(value)
    }

    /// Render the document the way the engine's own tooling writes it
    /// (two-space indent, non-ASCII kept as is)
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).map_err(AppError::Serialization)
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The full effect library, empty if the document has none
    pub fn effect_library(&self) -> &[Value] {
        array_field(&self.root, KEY_EFFECT_LIBRARY)
    }

    /// The effect library for in-place edits, created if missing
    pub fn effect_library_mut(&mut self) -> Result<&mut Vec<Value>> {
        array_field_mut(&mut self.root, KEY_EFFECT_LIBRARY)
    }

    /// `meshes[0].specialEffectTriggers`, empty if there is no such array
    pub fn triggers(&self) -> &[Value] {
        self.first_mesh()
            .map(|mesh| array_field(mesh, KEY_TRIGGERS))
            .unwrap_or(&[])
    }

    /// The trigger array of the first mesh, created on that mesh if missing.
    ///
    /// Fails when the document has no mesh at all: triggers have nowhere to live.
    pub fn triggers_mut(&mut self) -> Result<&mut Vec<Value>> {
        let mesh = self
            .root
            .get_mut(KEY_MESHES)
            .and_then(Value::as_array_mut)
            .and_then(|meshes| meshes.first_mut())
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                AppError::InvalidDocument("no mesh available to hold alarm triggers".to_string())
            })?;

        array_field_mut(mesh, KEY_TRIGGERS)
    }

    /// Whether [`Document::triggers_mut`] would succeed: `meshes[0]` exists and
    /// its trigger field is absent or an array
    pub fn can_store_triggers(&self) -> bool {
        self.first_mesh().map_or(false, |mesh| {
            mesh.get(KEY_TRIGGERS).map_or(true, Value::is_array)
        })
    }

    /// The notes array, empty if the document has none
    pub fn notes(&self) -> &[Value] {
        array_field(&self.root, KEY_NOTES)
    }

    /// The notes array for in-place edits, created if missing
    pub fn notes_mut(&mut self) -> Result<&mut Vec<Value>> {
        array_field_mut(&mut self.root, KEY_NOTES)
    }

    fn first_mesh(&self) -> Option<&Map<String, Value>> {
        self.root
            .get(KEY_MESHES)?
            .as_array()?
            .first()?
            .as_object()
    }
}

fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn array_field_mut<'a>(map: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Vec<Value>> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| AppError::InvalidDocument(format!("`{}` is not an array", key)))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
