//! In-memory stand-ins for the two backends and the speech capability.

use crate::api::{ApiError, ApiResult, AuthApi, NotesApi, SigninRequest, SignupRequest};
use crate::models::{NewNote, Note, NoteKind};
use crate::notes::{DictationEvent, SpeechError, SpeechToText};
use crate::storage::TokenStore;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::http(status, serde_json::json!({ "message": message }).to_string())
}

fn offline() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

pub(crate) fn note(id: &str, title: &str, content: &str, favorite: bool) -> Note {
    Note {
        id: Some(id.to_string()),
        title: title.to_string(),
        content: content.to_string(),
        kind: NoteKind::Text,
        timestamp: "Mar 13, 2024, 9:41 AM".to_string(),
        duration: None,
        favorite,
        image: None,
        extra: serde_json::Map::new(),
    }
}

#[derive(Default)]
struct FakeAuthState {
    accounts: Vec<SignupRequest>,
    session_active: bool,
    offline: bool,
}

#[derive(Clone, Default)]
pub(crate) struct FakeAuthBackend {
    state: Rc<RefCell<FakeAuthState>>,
}

impl FakeAuthBackend {
    pub fn with_account(email: &str, password: &str) -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().accounts.push(SignupRequest {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        fake
    }

    pub fn start_session(&self) {
        self.state.borrow_mut().session_active = true;
    }

    pub fn session_active(&self) -> bool {
        self.state.borrow().session_active
    }

    pub fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }
}

impl AuthApi for FakeAuthBackend {
    async fn signup(&self, req: &SignupRequest) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        if state.offline {
            return Err(offline());
        }
        if state.accounts.iter().any(|a| a.email == req.email) {
            return Err(rejected(400, "User already exists"));
        }
        state.accounts.push(req.clone());
        Ok(())
    }

    async fn signin(&self, req: &SigninRequest) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        if state.offline {
            return Err(offline());
        }
        let known = state
            .accounts
            .iter()
            .any(|a| a.email == req.email && a.password == req.password);
        if !known {
            return Err(rejected(401, "Invalid email or password"));
        }
        state.session_active = true;
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        if state.offline {
            return Err(offline());
        }
        state.session_active = false;
        Ok(())
    }

    async fn check_session(&self) -> ApiResult<()> {
        let state = self.state.borrow();
        if state.offline {
            return Err(offline());
        }
        if state.session_active {
            Ok(())
        } else {
            Err(rejected(401, "Unauthorized"))
        }
    }
}

#[derive(Default)]
struct FakeNotesState {
    notes: Vec<Note>,
    next_id: u64,
    offline: bool,
    list_fails: bool,
    requests: Vec<String>,
    lags: HashMap<String, VecDeque<u32>>,
}

/// Document-store stand-in. Every call yields once before touching state so
/// concurrent chains interleave the way real requests do. [`lag`] holds
/// individual responses back for extra yields.
///
/// [`lag`]: FakeNotesBackend::lag
#[derive(Clone, Default)]
pub(crate) struct FakeNotesBackend {
    state: Rc<RefCell<FakeNotesState>>,
}

impl FakeNotesBackend {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().notes = notes;
        fake
    }

    pub fn stored(&self) -> Vec<Note> {
        self.state.borrow().notes.clone()
    }

    pub fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }

    pub fn fail_lists(&self) {
        self.state.borrow_mut().list_fails = true;
    }

    /// Queues extra yields for successive `request`s (`"GET /notes"`,
    /// `"PUT /notes/n1"`, ...), consumed in arrival order. Reads and writes
    /// happen before the lag, so a lagged list returns a stale snapshot.
    pub fn lag(&self, request: &str, yields: &[u32]) {
        self.state
            .borrow_mut()
            .lags
            .entry(request.to_string())
            .or_default()
            .extend(yields);
    }

    async fn stall(&self, request: &str) {
        let yields = self
            .state
            .borrow_mut()
            .lags
            .get_mut(request)
            .and_then(VecDeque::pop_front)
            .unwrap_or(0);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }
    }

    /// `METHOD path` of every request seen, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }

    fn record(&self, request: String) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request);
        if state.offline {
            Err(offline())
        } else {
            Ok(())
        }
    }
}

impl NotesApi for FakeNotesBackend {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        tokio::task::yield_now().await;
        self.record("GET /notes".to_string())?;
        let snapshot = {
            let state = self.state.borrow();
            if state.list_fails {
                return Err(rejected(500, "Server error"));
            }
            state.notes.clone()
        };
        self.stall("GET /notes").await;
        Ok(snapshot)
    }

    async fn create_note(&self, new_note: &NewNote) -> ApiResult<()> {
        tokio::task::yield_now().await;
        self.record("POST /notes".to_string())?;

        let body = serde_json::to_value(new_note).map_err(ApiError::parse)?;
        let mut created: Note = serde_json::from_value(body).map_err(ApiError::parse)?;

        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        created.id = Some(format!("note-{}", state.next_id));
        created.favorite = false;
        created
            .extra
            .insert("__v".to_string(), serde_json::json!(0));
        state.notes.push(created);
        Ok(())
    }

    async fn update_note(&self, id: &str, note: &Note) -> ApiResult<()> {
        tokio::task::yield_now().await;
        self.record(format!("PUT /notes/{id}"))?;

        {
            let mut state = self.state.borrow_mut();
            let Some(slot) = state.notes.iter_mut().find(|n| n.id() == Some(id)) else {
                return Err(rejected(404, "Note not found"));
            };
            *slot = Note {
                id: Some(id.to_string()),
                ..note.clone()
            };
        }
        self.stall(&format!("PUT /notes/{id}")).await;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> ApiResult<()> {
        tokio::task::yield_now().await;
        self.record(format!("DELETE /notes/{id}"))?;

        let mut state = self.state.borrow_mut();
        let before = state.notes.len();
        state.notes.retain(|n| n.id() != Some(id));
        if state.notes.len() == before {
            return Err(rejected(404, "Note not found"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeSpeechState {
    unavailable: bool,
    listener: Option<Rc<dyn Fn(DictationEvent)>>,
    starts: u32,
    stops: u32,
}

#[derive(Clone, Default)]
pub(crate) struct FakeSpeech {
    state: Rc<RefCell<FakeSpeechState>>,
}

impl FakeSpeech {
    pub fn unavailable() -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().unavailable = true;
        fake
    }

    /// Delivers a final transcript followed by the end of recognition.
    pub fn say(&self, text: &str) {
        let listener = self.state.borrow().listener.clone();
        if let Some(listener) = listener {
            listener(DictationEvent::Transcript(text.to_string()));
            listener(DictationEvent::Ended);
        }
    }

    pub fn starts(&self) -> u32 {
        self.state.borrow().starts
    }

    pub fn stops(&self) -> u32 {
        self.state.borrow().stops
    }
}

impl SpeechToText for FakeSpeech {
    fn start(&self, on_event: Rc<dyn Fn(DictationEvent)>) -> Result<(), SpeechError> {
        let mut state = self.state.borrow_mut();
        if state.unavailable {
            return Err(SpeechError::Unavailable);
        }
        state.starts += 1;
        state.listener = Some(on_event);
        Ok(())
    }

    fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.stops += 1;
        state.listener = None;
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeTokens {
    clears: Rc<Cell<u32>>,
}

impl FakeTokens {
    pub fn clears(&self) -> u32 {
        self.clears.get()
    }
}

impl TokenStore for FakeTokens {
    fn clear_tokens(&self) {
        self.clears.set(self.clears.get() + 1);
    }
}
