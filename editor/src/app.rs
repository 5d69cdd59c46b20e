//! Editing session
//!
//! One session owns one loaded `config.json` and the services that edit it.
//! Nothing is shared between sessions; reloading throws away unsaved edits.

use crate::document::{Document, DocumentStore};
use crate::error::Result;
use crate::models::{AlarmForm, AlarmView, NoteForm, NoteView};
use crate::services::{media, AlarmService, EditState, NoteService};
use std::path::Path;

/// A loaded config document with its alarm and note editors
#[derive(Debug, Clone)]
pub struct EditorSession {
    store: DocumentStore,
    document: Document,
    alarms: AlarmService,
    notes: NoteService,
}

impl EditorSession {
    /// Open the `config.json` in a wallpaper directory
    pub async fn open(dir: &Path) -> Result<Self> {
        Self::open_store(DocumentStore::for_directory(dir)).await
    }

    /// Open the document behind a store
    pub async fn open_store(store: DocumentStore) -> Result<Self> {
        tracing::info!("Opening session for {:?}", store.path());

        let document = store.load().await?;
        let mut session = Self {
            alarms: AlarmService::new(store.clone()),
            notes: NoteService::new(store.clone()),
            store,
            document,
        };
        session.derive()?;

        Ok(session)
    }

    /// Re-read the file, discarding unsaved edits
    pub async fn reload(&mut self) -> Result<()> {
        self.document = self.store.load().await?;
        self.derive()?;
        tracing::info!("Session reloaded from {:?}", self.store.path());
        Ok(())
    }

    fn derive(&mut self) -> Result<()> {
        self.notes.load(&mut self.document)?;
        self.alarms.load(&self.document);
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn directory(&self) -> &Path {
        self.store.directory()
    }

    /// Save the whole document, regenerating alarm triggers first
    pub async fn save(&mut self) -> Result<()> {
        self.alarms.save(&mut self.document).await
    }

    /// Sound files available for alarms in the session's directory
    pub async fn audio_choices(&self) -> Result<Vec<String>> {
        media::find_audio_files(self.directory()).await
    }

    // ===== Alarms =====

    pub fn alarms(&self) -> &[AlarmView] {
        self.alarms.alarms()
    }

    pub fn alarm(&self, index: usize) -> Result<&AlarmView> {
        self.alarms.get(index)
    }

    pub fn add_alarm(&mut self, form: &AlarmForm) -> Result<usize> {
        self.alarms.create(&mut self.document, form)
    }

    pub fn update_alarm(&mut self, index: usize, form: &AlarmForm) -> Result<()> {
        self.alarms.update(&mut self.document, index, form)
    }

    pub fn delete_alarm(&mut self, index: usize) -> Result<AlarmView> {
        self.alarms.delete(&mut self.document, index)
    }

    pub fn alarm_edit_state(&self) -> EditState {
        self.alarms.state()
    }

    pub fn begin_alarm_create(&mut self) -> AlarmForm {
        self.alarms.begin_create()
    }

    pub fn begin_alarm_edit(&mut self, index: usize) -> Result<AlarmForm> {
        self.alarms.begin_edit(index)
    }

    pub fn cancel_alarm_edit(&mut self) {
        self.alarms.cancel();
    }

    pub fn commit_alarm_edit(&mut self, form: &AlarmForm) -> Result<usize> {
        self.alarms.commit(&mut self.document, form)
    }

    // ===== Notes =====

    pub fn notes(&self) -> Vec<NoteView> {
        self.notes.list(&self.document)
    }

    pub fn note(&self, index: usize) -> Result<NoteView> {
        self.notes.get(&self.document, index)
    }

    pub fn add_note(&mut self, form: &NoteForm) -> Result<usize> {
        self.notes.add(&mut self.document, form)
    }

    pub fn update_note(&mut self, index: usize, form: &NoteForm) -> Result<()> {
        self.notes.update(&mut self.document, index, form)
    }

    pub fn remove_note(&mut self, index: usize) -> Result<NoteView> {
        self.notes.remove(&mut self.document, index)
    }

    pub async fn save_notes(&self) -> Result<()> {
        self.notes.save(&self.document).await
    }
}
