//! Dioxus UI components for catscan.
//!
//! Provides the upload zone with drag-and-drop, the image preview with a
//! remove control, the classify trigger, the result panel, and the
//! processing overlay.

mod classify_button;
mod overlay;
mod preview;
mod result;
mod upload;

pub use classify_button::ClassifyButton;
pub use overlay::ProcessingOverlay;
pub use preview::ImagePreview;
pub use result::ResultPanel;
pub use upload::FileUpload;
