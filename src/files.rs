//! Browser File Access
//!
//! Reads a picked `File` into an owned [`ImageFile`] so the rest of the app
//! never holds JS handles across awaits.

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::models::ImageFile;

/// First file of an `<input type="file">` change event, if any
pub fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Clear a file input so picking the same file again fires `change`
pub fn reset_input(ev: &web_sys::Event) {
    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
        input.set_value("");
    }
}

pub async fn read_image(file: &web_sys::File) -> Result<ImageFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(ImageFile::new(file.name(), file.type_(), bytes))
}
