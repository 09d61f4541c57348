//! Notes dashboard controller: the view state, its filters, dictation and the
//! sync service that talks to the backend.

mod filter;
mod image;
mod speech;
mod sync;
mod view;

pub(crate) use filter::ViewFilter;
pub(crate) use image::read_as_data_url;
pub(crate) use speech::{BrowserSpeech, DictationEvent, SpeechError, SpeechToText};
pub(crate) use sync::NotesSync;
pub(crate) use view::NotesView;
