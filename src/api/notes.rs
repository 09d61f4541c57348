use super::{ApiError, ApiResult, HttpTransport, NotesApi};
use crate::models::{NewNote, Note};
use reqwest::{Method, StatusCode};

fn is_success(status: StatusCode) -> bool {
    status.is_success()
}

/// Client for the notes CRUD service.
#[derive(Clone, Debug)]
pub(crate) struct NotesClient {
    transport: HttpTransport,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>, with_credentials: bool) -> Self {
        Self {
            transport: HttpTransport::new(base_url, with_credentials),
        }
    }

    fn note_path(id: &str) -> String {
        format!("/notes/{}", urlencoding::encode(id))
    }
}

/// Decodes a `GET /notes` body.
///
/// A body that is not an array yields no notes. Array items that do not look
/// like a note are skipped instead of failing the whole refresh.
pub(crate) fn parse_note_list_response(data: serde_json::Value) -> Vec<Note> {
    let serde_json::Value::Array(items) = data else {
        return Vec::new();
    };

    let mut out: Vec<Note> = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Note>(item) {
            Ok(note) => out.push(note),
            Err(e) => tracing::warn!("skipping malformed note in list response: {e}"),
        }
    }
    out
}

impl NotesApi for NotesClient {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        let res = self
            .transport
            .send(Method::GET, "/notes", None::<&()>, is_success)
            .await?;
        let data: serde_json::Value = res.json().await.map_err(ApiError::parse)?;
        Ok(parse_note_list_response(data))
    }

    async fn create_note(&self, note: &NewNote) -> ApiResult<()> {
        self.transport
            .send(Method::POST, "/notes", Some(note), is_success)
            .await
            .map(drop)
    }

    async fn update_note(&self, id: &str, note: &Note) -> ApiResult<()> {
        self.transport
            .send(Method::PUT, &Self::note_path(id), Some(note), is_success)
            .await
            .map(drop)
    }

    async fn delete_note(&self, id: &str) -> ApiResult<()> {
        self.transport
            .send(Method::DELETE, &Self::note_path(id), None::<&()>, is_success)
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_note_list_response_keeps_order() {
        let data = serde_json::json!([
            {"_id": "b", "title": "second", "content": "", "type": "text", "favorite": false},
            {"_id": "a", "title": "first", "content": "hi", "type": "audio", "duration": "00:01", "favorite": true},
        ]);
        let notes = parse_note_list_response(data);
        let ids: Vec<_> = notes.iter().filter_map(|n| n.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(notes[1].kind, NoteKind::Audio);
        assert!(notes[1].favorite);
    }

    #[test]
    fn test_parse_note_list_response_non_array_is_empty() {
        assert!(parse_note_list_response(serde_json::json!({"error": "boom"})).is_empty());
        assert!(parse_note_list_response(serde_json::Value::Null).is_empty());
    }

    #[test]
    fn test_parse_note_list_response_skips_malformed_items() {
        let data = serde_json::json!([
            {"_id": "ok", "title": "fine"},
            {"_id": "bad", "type": "video"},
            "not a note",
        ]);
        let notes = parse_note_list_response(data);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id(), Some("ok"));
    }

    #[test]
    fn test_note_path_encodes_id() {
        assert_eq!(NotesClient::note_path("65f1c0ffee"), "/notes/65f1c0ffee");
        assert_eq!(NotesClient::note_path("a/b c"), "/notes/a%2Fb%20c");
    }
}
