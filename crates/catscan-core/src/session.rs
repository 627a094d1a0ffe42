//! The single upload/classify session and its state machine.
//!
//! ```text
//!   Idle --load--> Loaded --begin_classify--> Requesting
//!    ^               |  ^                         |
//!    +----remove-----+  +--------complete---------+
//! ```
//!
//! `Requesting` always returns to `Loaded`: [`Session::begin_classify`]
//! hands out an [`InFlight`] ticket and [`Session::complete`] consumes it,
//! clearing the processing flag unconditionally. Callers obtain the
//! outcome to pass to `complete` from
//! [`run_classification`](crate::run_classification), which cannot fail.

use crate::classify::{ClassificationRequest, Outcome};
use crate::upload::{ImagePayload, UploadError};

/// Lifecycle state derived from the session contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No image loaded.
    Idle,
    /// An image is loaded and no request is in flight.
    Loaded,
    /// A classification request is in flight.
    Requesting,
}

/// Why a classify or remove attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// There is no image to classify.
    #[error("no image is loaded")]
    NoImage,

    /// Another classification is still running.
    #[error("a classification is already in progress")]
    AlreadyProcessing,
}

/// Proof that a request is in flight, carrying the request to send.
///
/// Must be handed back to [`Session::complete`].
#[derive(Debug)]
#[must_use = "an in-flight ticket must be passed to Session::complete"]
pub struct InFlight {
    request: ClassificationRequest,
}

impl InFlight {
    /// The request built from the session image at submit time.
    #[must_use]
    pub const fn request(&self) -> &ClassificationRequest {
        &self.request
    }
}

/// The current image, the processing flag, and the last outcome for the
/// current image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    image: Option<ImagePayload>,
    processing: bool,
    outcome: Option<Outcome>,
}

impl Session {
    /// An empty session in [`Phase::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match (&self.image, self.processing) {
            (_, true) => Phase::Requesting,
            (Some(_), false) => Phase::Loaded,
            (None, false) => Phase::Idle,
        }
    }

    /// The loaded image, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// Outcome of the last completed classification of the current image.
    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Whether [`begin_classify`](Self::begin_classify) would succeed.
    #[must_use]
    pub const fn can_classify(&self) -> bool {
        matches!(self.phase(), Phase::Loaded)
    }

    /// Make `payload` the session image, replacing any previous image and
    /// discarding its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Busy`] while a request is in flight; the
    /// session is left unchanged.
    pub fn load(&mut self, payload: ImagePayload) -> Result<(), UploadError> {
        if self.processing {
            return Err(UploadError::Busy);
        }
        tracing::debug!(
            file = payload.name(),
            size = payload.size(),
            media_type = payload.media_type(),
            "image loaded"
        );
        self.image = Some(payload);
        self.outcome = None;
        Ok(())
    }

    /// Clear the image and its outcome. Calling this with nothing loaded
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::AlreadyProcessing`] while a request is in
    /// flight; the session is left unchanged.
    pub fn remove(&mut self) -> Result<(), Rejected> {
        if self.processing {
            return Err(Rejected::AlreadyProcessing);
        }
        if self.image.take().is_some() {
            tracing::debug!("image removed");
        }
        self.outcome = None;
        Ok(())
    }

    /// Enter [`Phase::Requesting`] and build the request to send.
    ///
    /// # Errors
    ///
    /// [`Rejected::AlreadyProcessing`] if a request is in flight,
    /// [`Rejected::NoImage`] if nothing is loaded. Either way the session
    /// is left unchanged.
    pub fn begin_classify(&mut self) -> Result<InFlight, Rejected> {
        if self.processing {
            return Err(Rejected::AlreadyProcessing);
        }
        let image = self.image.as_ref().ok_or(Rejected::NoImage)?;
        let request = ClassificationRequest {
            image: image.data_uri().to_owned(),
        };
        self.processing = true;
        self.outcome = None;
        tracing::debug!("classification started");
        Ok(InFlight { request })
    }

    /// Leave [`Phase::Requesting`], recording `outcome`.
    ///
    /// Always clears the processing flag.
    pub fn complete(&mut self, ticket: InFlight, outcome: Outcome) {
        drop(ticket);
        self.processing = false;
        self.outcome = Some(outcome);
    }
}
