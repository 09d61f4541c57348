use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;

/// Local time as the notes backend stores it, e.g. `Mar 13, 2024, 9:41 AM`.
pub(crate) fn display_timestamp() -> String {
    let options = Object::new();
    let _ = Reflect::set(&options, &"dateStyle".into(), &JsValue::from_str("medium"));
    let _ = Reflect::set(&options, &"timeStyle".into(), &JsValue::from_str("short"));
    js_sys::Date::new_0()
        .to_locale_string("en-US", &options)
        .into()
}

/// Runs `f` once after `ms` milliseconds.
pub(crate) fn set_timeout(f: impl FnOnce() + 'static, ms: i32) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
    {
        tracing::warn!("set_timeout failed: {e:?}");
    }
}
