use js_sys::{Function, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DictationEvent {
    /// Final transcript of the utterance.
    Transcript(String),
    /// Recognition finished, with or without a result.
    Ended,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SpeechError {
    #[error("speech recognition is not supported in this browser")]
    Unavailable,
    #[error("speech recognition failed to start: {0}")]
    Start(String),
}

/// Single-utterance speech-to-text.
pub(crate) trait SpeechToText {
    /// Starts listening. `on_event` receives the final transcript and then
    /// `Ended`.
    fn start(&self, on_event: Rc<dyn Fn(DictationEvent)>) -> Result<(), SpeechError>;

    /// Cancels outstanding recognition. No events are delivered afterwards.
    fn stop(&self);
}

const LANG: &str = "en-US";

struct ActiveRecognition {
    recognition: JsValue,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
}

impl ActiveRecognition {
    fn detach_and_stop(&self) {
        let _ = Reflect::set(&self.recognition, &"onresult".into(), &JsValue::NULL);
        let _ = Reflect::set(&self.recognition, &"onend".into(), &JsValue::NULL);
        if let Ok(stop) = method(&self.recognition, "stop") {
            let _ = stop.call0(&self.recognition);
        }
    }
}

/// Web Speech API (`SpeechRecognition`, or the `webkit` prefixed constructor).
#[derive(Clone, Default)]
pub(crate) struct BrowserSpeech {
    active: Rc<RefCell<Option<ActiveRecognition>>>,
}

fn recognition_constructor() -> Option<Function> {
    let window = web_sys::window()?;
    ["SpeechRecognition", "webkitSpeechRecognition"]
        .into_iter()
        .find_map(|name| {
            Reflect::get(&window, &name.into())
                .ok()
                .filter(|v| v.is_function())
                .map(|v| v.unchecked_into::<Function>())
        })
}

fn method(target: &JsValue, name: &str) -> Result<Function, SpeechError> {
    Reflect::get(target, &name.into())
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| SpeechError::Start(format!("missing `{name}`")))
}

/// `event.results[0][0].transcript`
fn final_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &"results".into()).ok()?;
    let first = Reflect::get_u32(&results, 0).ok()?;
    let best = Reflect::get_u32(&first, 0).ok()?;
    Reflect::get(&best, &"transcript".into()).ok()?.as_string()
}

impl SpeechToText for BrowserSpeech {
    fn start(&self, on_event: Rc<dyn Fn(DictationEvent)>) -> Result<(), SpeechError> {
        let ctor = recognition_constructor().ok_or(SpeechError::Unavailable)?;
        let recognition = Reflect::construct(&ctor, &js_sys::Array::new())
            .map_err(|e| SpeechError::Start(format!("{e:?}")))?;

        let set = |key: &str, value: JsValue| {
            Reflect::set(&recognition, &key.into(), &value)
                .map(drop)
                .map_err(|e| SpeechError::Start(format!("{e:?}")))
        };
        set("continuous", JsValue::FALSE)?;
        set("interimResults", JsValue::FALSE)?;
        set("lang", JsValue::from_str(LANG))?;

        let on_result_event = on_event.clone();
        let on_result = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            if let Some(text) = final_transcript(&event) {
                on_result_event(DictationEvent::Transcript(text));
            }
        });
        let on_end = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            on_event(DictationEvent::Ended);
        });
        set("onresult", on_result.as_ref().clone())?;
        set("onend", on_end.as_ref().clone())?;

        // One utterance at a time.
        self.stop();

        method(&recognition, "start")?
            .call0(&recognition)
            .map_err(|e| SpeechError::Start(format!("{e:?}")))?;

        *self.active.borrow_mut() = Some(ActiveRecognition {
            recognition,
            _on_result: on_result,
            _on_end: on_end,
        });
        Ok(())
    }

    fn stop(&self) {
        if let Some(active) = self.active.borrow_mut().take() {
            active.detach_and_stop();
        }
    }
}
