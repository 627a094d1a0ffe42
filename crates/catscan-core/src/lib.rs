//! catscan-core: The upload -> classify -> result lifecycle (sans-IO).
//!
//! Validates and encodes an uploaded image, tracks the single
//! [`Session`] through its [`Phase`]s, runs one classification request
//! against an injected [`Transport`] while holding a minimum display
//! time via an injected [`Timer`], and maps the outcome to a
//! [`ResultView`] for display.
//!
//! This crate has **no browser dependencies**. The `fetch` transport,
//! the browser timer, and all Dioxus components live in `catscan-io`.

pub mod classify;
pub mod config;
pub mod render;
pub mod session;
pub mod shortcut;
pub mod upload;

pub use classify::{
    Classification, ClassificationRequest, ClassifyError, HttpReply, Outcome, Prediction, Timer,
    Transport, run_classification,
};
pub use config::ClassifierConfig;
pub use render::{LabelStyle, PredictionRow, ResultView};
pub use session::{InFlight, Phase, Rejected, Session};
pub use shortcut::{Action, shortcut};
pub use upload::{Candidate, ImagePayload, UploadError};
