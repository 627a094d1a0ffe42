//! catscan-io: Browser I/O and Dioxus component library.
//!
//! Provides the `fetch`-backed [`FetchTransport`], the `setTimeout`-backed
//! [`BrowserTimer`], a programmatic file-picker trigger, and the UI
//! components for the catscan web application.

pub mod components;
pub mod fetch;
pub mod picker;
pub mod timer;

pub use components::{ClassifyButton, FileUpload, ImagePreview, ProcessingOverlay, ResultPanel};
pub use fetch::FetchTransport;
pub use timer::BrowserTimer;
