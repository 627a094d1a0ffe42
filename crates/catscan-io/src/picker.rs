//! Open the upload file picker without a click on the input itself.
//!
//! Browsers only allow this from a user-gesture context, so call it from
//! a key or click handler.

use wasm_bindgen::JsCast;

/// `id` of the hidden `<input type="file">` rendered by
/// [`FileUpload`](crate::FileUpload).
pub const FILE_INPUT_ID: &str = "catscan-file-input";

/// Errors that can occur when opening the picker.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// A browser API call failed or the input element is missing.
    #[error("file picker unavailable: {0}")]
    JsError(String),
}

/// Click the hidden file input, opening the browser's file dialog.
///
/// # Errors
///
/// Returns [`PickerError::JsError`] if the document or the input with
/// [`FILE_INPUT_ID`] cannot be found (e.g. an image is already loaded and
/// the upload zone is not rendered).
pub fn open_file_picker() -> Result<(), PickerError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PickerError::JsError("no document".into()))?;
    let input = document
        .get_element_by_id(FILE_INPUT_ID)
        .ok_or_else(|| PickerError::JsError(format!("no element with id {FILE_INPUT_ID}")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|e| PickerError::JsError(format!("failed to cast element: {e:?}")))?;
    input.click();
    Ok(())
}
