use super::view::SaveRequest;
use crate::api::{ApiResult, NotesApi};
use crate::models::Note;

/// Mutation-then-refresh against the notes backend.
///
/// Every mutation is followed by a full list fetch. For the mutating calls,
/// `Err` means the mutation itself failed; `Ok(None)` means it went through
/// but the refresh did not, so the caller keeps its current list.
#[derive(Clone)]
pub(crate) struct NotesSync<A> {
    api: A,
}

impl<A: NotesApi> NotesSync<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn refresh(&self) -> Option<Vec<Note>> {
        match self.api.list_notes().await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "notes refreshed");
                Some(notes)
            }
            Err(e) => {
                tracing::error!("Error fetching notes: {e}");
                None
            }
        }
    }

    pub async fn save(&self, request: &SaveRequest) -> ApiResult<Option<Vec<Note>>> {
        let result = match request {
            SaveRequest::Create(new_note) => self.api.create_note(new_note).await,
            SaveRequest::Update { id, note } => self.api.update_note(id, note).await,
        };
        if let Err(e) = &result {
            tracing::error!("Error saving note: {e}");
        }
        result?;
        Ok(self.refresh().await)
    }

    /// Full-record update of an existing note (favorite, image, detail edits).
    pub async fn update(&self, id: &str, note: &Note) -> ApiResult<Option<Vec<Note>>> {
        if let Err(e) = self.api.update_note(id, note).await {
            tracing::error!(id, "Error updating note: {e}");
            return Err(e);
        }
        Ok(self.refresh().await)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Option<Vec<Note>>> {
        if let Err(e) = self.api.delete_note(id).await {
            tracing::error!(id, "Error deleting note: {e}");
            return Err(e);
        }
        Ok(self.refresh().await)
    }
}
