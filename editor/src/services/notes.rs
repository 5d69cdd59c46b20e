//! Notes service
//!
//! Edits the document's `notes` array in place. Notes are identified by
//! position; there is no secondary index.

use crate::config::{
    DEFAULT_NOTE_BACKGROUND, DEFAULT_NOTE_SCALE, KEY_NOTE_BACKGROUND, KEY_NOTE_SCALE,
    KEY_NOTE_TEXT, KEY_NOTE_VISIBLE,
};
use crate::document::{Document, DocumentStore};
use crate::error::{AppError, Result};
use crate::models::{NoteForm, NoteView};
use serde_json::{json, Map, Value};

/// Service for managing notes
#[derive(Debug, Clone)]
pub struct NoteService {
    store: DocumentStore,
}

impl NoteService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Fill in `visible: true` on notes that lack it.
    ///
    /// Only the in-memory document changes; the file picks it up on the next
    /// save. Returns how many notes were defaulted.
    pub fn load(&self, doc: &mut Document) -> Result<usize> {
        if doc.notes().is_empty() {
            return Ok(0);
        }

        let mut defaulted = 0;
        for note in doc.notes_mut()?.iter_mut() {
            if let Some(note) = note.as_object_mut() {
                if !note.contains_key(KEY_NOTE_VISIBLE) {
                    note.insert(KEY_NOTE_VISIBLE.to_string(), Value::Bool(true));
                    defaulted += 1;
                }
            }
        }

        tracing::debug!("Loaded notes, {} defaulted to visible", defaulted);

        Ok(defaulted)
    }

    /// List all notes
    pub fn list(&self, doc: &Document) -> Vec<NoteView> {
        doc.notes()
            .iter()
            .enumerate()
            .map(|(index, note)| note_view(index, note))
            .collect()
    }

    /// Get a note by position
    pub fn get(&self, doc: &Document, index: usize) -> Result<NoteView> {
        doc.notes()
            .get(index)
            .map(|note| note_view(index, note))
            .ok_or(AppError::NoteNotFound(index))
    }

    /// Append a new note, returning its position
    pub fn add(&self, doc: &mut Document, form: &NoteForm) -> Result<usize> {
        let text = validate_text(&form.text)?;

        let notes = doc.notes_mut()?;
        notes.push(json!({
            KEY_NOTE_VISIBLE: form.visible,
            KEY_NOTE_BACKGROUND: DEFAULT_NOTE_BACKGROUND,
            KEY_NOTE_TEXT: text,
            KEY_NOTE_SCALE: DEFAULT_NOTE_SCALE,
        }));

        tracing::info!("Added note {}", notes.len() - 1);

        Ok(notes.len() - 1)
    }

    /// Update a note in place.
    ///
    /// `backgroundImage`, `scale` and any other keys keep their values and order;
    /// missing background or scale get the defaults.
    pub fn update(&self, doc: &mut Document, index: usize, form: &NoteForm) -> Result<()> {
        let text = validate_text(&form.text)?;

        let note = doc
            .notes_mut()?
            .get_mut(index)
            .ok_or(AppError::NoteNotFound(index))?;

        if !note.is_object() {
            *note = Value::Object(Map::new());
        }

        if let Some(note) = note.as_object_mut() {
            note.insert(KEY_NOTE_VISIBLE.to_string(), Value::Bool(form.visible));
            note.entry(KEY_NOTE_BACKGROUND)
                .or_insert_with(|| json!(DEFAULT_NOTE_BACKGROUND));
            note.insert(KEY_NOTE_TEXT.to_string(), Value::String(text));
            note.entry(KEY_NOTE_SCALE)
                .or_insert_with(|| json!(DEFAULT_NOTE_SCALE));
        }

        tracing::debug!("Updated note {}", index);

        Ok(())
    }

    /// Remove a note, returning what it held
    pub fn remove(&self, doc: &mut Document, index: usize) -> Result<NoteView> {
        let notes = doc.notes_mut()?;
        if index >= notes.len() {
            return Err(AppError::NoteNotFound(index));
        }

        let removed = notes.remove(index);

        tracing::info!("Removed note {}", index);

        Ok(note_view(index, &removed))
    }

    /// Persist the document
    pub async fn save(&self, doc: &Document) -> Result<()> {
        self.store.save(doc).await?;
        tracing::info!("Saved {} notes", doc.notes().len());
        Ok(())
    }
}

fn validate_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("note text cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn note_view(index: usize, note: &Value) -> NoteView {
    NoteView {
        index,
        visible: note
            .get(KEY_NOTE_VISIBLE)
            .and_then(Value::as_bool)
            .unwrap_or(true),
        text: note
            .get(KEY_NOTE_TEXT)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        background_image: note
            .get(KEY_NOTE_BACKGROUND)
            .and_then(Value::as_str)
            .map(str::to_string),
        scale: note.get(KEY_NOTE_SCALE).and_then(Value::as_f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_document() -> Document {
        Document::from_value(json!({
            "notes": [
                { "text": "buy milk", "backgroundImage": "yellow.png", "scale": 0.8 },
                { "visible": false, "text": "hidden", "font": "serif" }
            ],
            "other": { "keep": true }
        }))
        .unwrap()
    }

    fn create_test_service() -> (NoteService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = NoteService::new(DocumentStore::for_directory(temp_dir.path()));
        (service, temp_dir)
    }

    #[test]
    fn test_load_defaults_visible() {
        let (service, _temp) = create_test_service();
        let mut doc = sample_document();

        assert!(service.list(&doc)[0].visible);
        assert!(doc.notes()[0].get("visible").is_none());

        assert_eq!(service.load(&mut doc).unwrap(), 1);
        assert_eq!(doc.notes()[0]["visible"], true);
        assert_eq!(doc.notes()[1]["visible"], false);
    }

    #[test]
    fn test_load_without_notes_does_not_create_array() {
        let (service, _temp) = create_test_service();
        let mut doc = Document::from_value(json!({})).unwrap();

        assert_eq!(service.load(&mut doc).unwrap(), 0);
        assert!(doc.root().get("notes").is_none());
    }

    #[test]
    fn test_list_views() {
        let (service, _temp) = create_test_service();
        let doc = sample_document();

        let notes = service.list(&doc);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "buy milk");
        assert_eq!(notes[0].background_image.as_deref(), Some("yellow.png"));
        assert_eq!(notes[0].scale, Some(0.8));
        assert!(!notes[1].visible);
        assert_eq!(notes[1].scale, None);
    }

    #[test]
    fn test_add_uses_defaults_and_trims() {
        let (service, _temp) = create_test_service();
        let mut doc = sample_document();

        let index = service
            .add(&mut doc, &NoteForm::new("  call mom \n"))
            .unwrap();

        assert_eq!(index, 2);
        assert_eq!(
            doc.notes()[2],
            json!({ "visible": true, "backgroundImage": "note.png", "text": "call mom", "scale": 0.5 })
        );
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let (service, _temp) = create_test_service();
        let mut doc = sample_document();
        let before = doc.clone();

        let err = service.add(&mut doc, &NoteForm::new(" \n\t ")).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_keeps_passthrough_fields() {
        let (service, _temp) = create_test_service();
        let mut doc = sample_document();

        let form = NoteForm {
            visible: true,
            text: "shown".to_string(),
        };
        service.update(&mut doc, 1, &form).unwrap();

        let note = doc.notes()[1].as_object().unwrap();
        let keys: Vec<&str> = note.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["visible", "text", "font", "backgroundImage", "scale"]);
        assert_eq!(note["font"], "serif");
        assert_eq!(note["text"], "shown");
        assert_eq!(note["visible"], true);

        service.update(&mut doc, 0, &NoteForm::new("oat milk")).unwrap();
        assert_eq!(doc.notes()[0]["scale"], 0.8);
        assert_eq!(doc.notes()[0]["backgroundImage"], "yellow.png");
    }

    #[test]
    fn test_update_and_remove_out_of_range() {
        let (service, _temp) = create_test_service();
        let mut doc = sample_document();

        assert!(matches!(
            service.update(&mut doc, 7, &NoteForm::new("x")),
            Err(AppError::NoteNotFound(7))
        ));
        assert!(matches!(service.remove(&mut doc, 2), Err(AppError::NoteNotFound(2))));
        assert!(matches!(service.get(&doc, 2), Err(AppError::NoteNotFound(2))));
    }

    #[test]
    fn test_remove() {
        let (service, _temp) = create_test_service();
        let mut doc = sample_document();

        let removed = service.remove(&mut doc, 0).unwrap();

        assert_eq!(removed.text, "buy milk");
        assert_eq!(doc.notes().len(), 1);
        assert_eq!(service.get(&doc, 0).unwrap().text, "hidden");
    }

    #[tokio::test]
    async fn test_visible_default_reaches_file_only_on_save() {
        let (service, temp) = create_test_service();
        let store = DocumentStore::for_directory(temp.path());
        store.save(&sample_document()).await.unwrap();

        let mut doc = store.load().await.unwrap();
        service.load(&mut doc).unwrap();

        let on_disk = store.load().await.unwrap();
        assert!(on_disk.notes()[0].get("visible").is_none());

        service.save(&doc).await.unwrap();

        let on_disk = store.load().await.unwrap();
        assert_eq!(on_disk.notes()[0]["visible"], true);
        assert_eq!(on_disk.root()["other"]["keep"], true);
    }
}
