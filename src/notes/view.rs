use super::filter::{empty_state_hint, visible_notes, ViewFilter};
use super::speech::{DictationEvent, SpeechError, SpeechToText};
use crate::models::{duration_for, NewNote, Note, NoteKind};
use std::rc::Rc;

/// In-progress fields of the create/edit modal.
///
/// When editing, the backend fields of the original note ride along so the
/// update replaces the full record without losing them.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NoteDraft {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
    pub image: Option<String>,
    pub favorite: bool,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NoteDraft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id().map(str::to_string),
            title: note.title.clone(),
            content: note.content.clone(),
            kind: note.kind,
            image: note.image.clone(),
            favorite: note.favorite,
            extra: note.extra.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SaveRequest {
    Create(NewNote),
    Update { id: String, note: Note },
}

/// Everything the notes dashboard renders from.
///
/// Pure state: network calls live in `NotesSync`, and every refresh replaces
/// `notes` wholesale.
#[derive(Clone, Debug, Default)]
pub(crate) struct NotesView {
    pub notes: Vec<Note>,
    pub filter: ViewFilter,
    pub query: String,
    pub sidebar_open: bool,

    // Create/edit modal.
    pub composer_open: bool,
    pub draft: NoteDraft,
    pub editing: bool,
    pub recording: bool,
    pub transcript: String,

    // Detail modal.
    pub selected: Option<Note>,
    pub fullscreen: bool,
    detail_revision: u64,
    detail_dirty: bool,
}

impl NotesView {
    pub fn with_filter(filter: ViewFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn visible(&self) -> Vec<&Note> {
        visible_notes(&self.notes, self.filter, &self.query)
    }

    pub fn empty_hint(&self) -> &'static str {
        empty_state_hint(self.filter, &self.query)
    }

    /// Installs the list from a refresh.
    ///
    /// An open detail modal follows the fresh copy of its note unless it has
    /// edits that are not persisted yet.
    pub fn replace_notes(&mut self, notes: Vec<Note>) {
        if !self.detail_dirty {
            if let Some(selected) = self.selected.as_mut() {
                if let Some(fresh) = notes.iter().find(|n| n.same_identity(selected)) {
                    *selected = fresh.clone();
                }
            }
        }
        self.notes = notes;
    }

    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
        self.sidebar_open = false;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn open_create(&mut self) {
        self.composer_open = true;
    }

    pub fn open_edit(&mut self, note: &Note) {
        self.draft = NoteDraft::from_note(note);
        self.editing = true;
        self.composer_open = true;
    }

    /// Opens the composer on the note with `id` as it currently is in the
    /// list. Returns false when no such note exists.
    pub fn open_edit_by_id(&mut self, id: &str) -> bool {
        let Some(note) = self.find(id).cloned() else {
            return false;
        };
        self.open_edit(&note);
        true
    }

    /// Hides the composer and resets it. Callers must also stop any running
    /// recognition.
    pub fn close_composer(&mut self) {
        self.composer_open = false;
        self.transcript.clear();
        self.draft = NoteDraft::default();
        self.editing = false;
        self.recording = false;
    }

    /// Content falls back to the transcript when the field was left empty.
    pub fn save_request(&self, timestamp: String) -> SaveRequest {
        let draft = &self.draft;
        let content = if draft.content.is_empty() {
            self.transcript.clone()
        } else {
            draft.content.clone()
        };

        match draft.id.clone().filter(|_| self.editing) {
            Some(id) => SaveRequest::Update {
                note: Note {
                    id: Some(id.clone()),
                    title: draft.title.clone(),
                    content,
                    kind: draft.kind,
                    timestamp,
                    duration: duration_for(draft.kind),
                    favorite: draft.favorite,
                    image: draft.image.clone(),
                    extra: draft.extra.clone(),
                },
                id,
            },
            None => SaveRequest::Create(NewNote {
                title: draft.title.clone(),
                content,
                kind: draft.kind,
                timestamp,
                duration: duration_for(draft.kind),
                image: draft.image.clone(),
            }),
        }
    }

    pub fn begin_recording<S: SpeechToText>(
        &mut self,
        speech: &S,
        on_event: Rc<dyn Fn(DictationEvent)>,
    ) -> Result<(), SpeechError> {
        speech.start(on_event)?;
        self.recording = true;
        Ok(())
    }

    pub fn end_recording<S: SpeechToText>(&mut self, speech: &S) {
        speech.stop();
        self.recording = false;
    }

    pub fn apply_dictation(&mut self, event: DictationEvent) {
        match event {
            DictationEvent::Transcript(text) => self.transcript = text,
            DictationEvent::Ended => self.recording = false,
        }
    }

    pub fn select(&mut self, note: &Note) {
        self.selected = Some(note.clone());
        self.detail_dirty = false;
        self.detail_revision += 1;
    }

    /// Opens the detail modal on the listed copy of the note with `id`.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        let Some(note) = self.find(id).cloned() else {
            return false;
        };
        self.select(&note);
        true
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == Some(id))
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Applies a keystroke to the open detail note. Returns the revision an
    /// autosave timer should later hand to [`Self::take_autosave`].
    pub fn edit_selected(&mut self, edit: impl FnOnce(&mut Note)) -> Option<u64> {
        let note = self.selected.as_mut()?;
        edit(note);
        self.detail_dirty = true;
        self.detail_revision += 1;
        Some(self.detail_revision)
    }

    /// The record to persist once typing has paused, i.e. when no edit
    /// happened after `revision`.
    pub fn take_autosave(&mut self, revision: u64) -> Option<Note> {
        if !self.detail_dirty || revision != self.detail_revision {
            return None;
        }
        self.detail_dirty = false;
        self.selected.clone().filter(|n| n.id().is_some())
    }

    /// Closes the detail modal, returning unsaved edits to flush.
    pub fn close_detail(&mut self) -> Option<Note> {
        let pending = self.selected.take().filter(|_| self.detail_dirty);
        self.detail_dirty = false;
        self.detail_revision += 1;
        self.fullscreen = false;
        pending.filter(|n| n.id().is_some())
    }

    /// Merges an uploaded image into the open note; the result is persisted
    /// immediately, pending text edits included.
    pub fn attach_image(&mut self, data_url: String) -> Option<Note> {
        let note = self.selected.as_mut()?;
        note.image = Some(data_url);
        self.detail_dirty = false;
        self.detail_revision += 1;
        self.selected.clone().filter(|n| n.id().is_some())
    }

    /// Record to send for a favorite toggle, read from the current list.
    ///
    /// If the note is open in the detail modal the toggle is applied there too
    /// and carries its unsaved edits, so a later autosave cannot revert it.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<Note> {
        let mut next = self.find(id)?.clone();
        next.favorite = !next.favorite;

        if let Some(selected) = self.selected.as_mut().filter(|s| s.id() == Some(id)) {
            selected.favorite = next.favorite;
            next = selected.clone();
            self.detail_dirty = false;
            self.detail_revision += 1;
        }
        Some(next)
    }
}
