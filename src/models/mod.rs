use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder duration the notes backend stores for every audio note.
pub(crate) const AUDIO_DURATION_PLACEHOLDER: &str = "00:01";

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum NoteKind {
    #[default]
    Text,
    Audio,
}

/// A note as stored by the notes backend.
///
/// The backend is a document store: the identity travels as `_id` and it may
/// attach bookkeeping fields of its own (`__v`, `createdAt`, ...). Those are kept
/// in `extra` so a full-record update sends them back untouched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Note {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    /// Transcript for audio notes.
    #[serde(default)]
    pub content: String,

    #[serde(rename = "type", default)]
    pub kind: NoteKind,

    /// Display string captured by the client when the note was saved.
    #[serde(default)]
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, deserialize_with = "null_as_false")]
    pub favorite: bool,

    /// Base64 data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Note {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Two records are the same note when both carry the same backend id.
    pub fn same_identity(&self, other: &Note) -> bool {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }

    pub fn is_audio(&self) -> bool {
        self.kind == NoteKind::Audio
    }

    /// Card badge: the recorded duration for audio notes, `Text` otherwise.
    pub fn kind_badge(&self) -> String {
        match self.kind {
            NoteKind::Audio => self
                .duration
                .clone()
                .unwrap_or_else(|| AUDIO_DURATION_PLACEHOLDER.to_string()),
            NoteKind::Text => "Text".to_string(),
        }
    }
}

/// Create payload. Never carries an id or a favorite flag; the backend
/// assigns the first and defaults the second to `false`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Audio notes carry the placeholder duration, text notes carry none.
pub(crate) fn duration_for(kind: NoteKind) -> Option<String> {
    match kind {
        NoteKind::Audio => Some(AUDIO_DURATION_PLACEHOLDER.to_string()),
        NoteKind::Text => None,
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
