use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, FileReader};

/// Reads `file` as a base64 data URL and hands it to `on_loaded`.
pub(crate) fn read_as_data_url(
    file: &File,
    on_loaded: impl FnOnce(String) + 'static,
) -> Result<(), JsValue> {
    let reader = FileReader::new()?;
    let target = reader.clone();
    let onload = Closure::once_into_js(move || match target.result() {
        Ok(result) => match result.as_string() {
            Some(data_url) => on_loaded(data_url),
            None => tracing::warn!("image reader produced a non-string result"),
        },
        Err(e) => tracing::error!("Error reading image: {e:?}"),
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.read_as_data_url(file)
}
