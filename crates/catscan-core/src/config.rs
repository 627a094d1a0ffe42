//! Classifier front-end configuration.

use std::time::Duration;

/// Path the classification request is posted to.
pub const DEFAULT_ENDPOINT: &str = "/classify";

/// Minimum time a classify action takes as observed by the user.
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_secs(2);

/// Largest accepted upload, in bytes (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Settings for the upload and classification lifecycle.
///
/// [`Default`] matches the deployed classifier service. Tests shrink
/// `min_display` so they do not wait the full two seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// URL (absolute or page-relative) of the classification endpoint.
    pub endpoint: String,

    /// Floor on how long a classify action takes before its outcome is
    /// shown, regardless of how fast the server answers.
    pub min_display: Duration,

    /// Uploads larger than this many bytes are rejected before reading.
    pub max_upload_bytes: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            min_display: DEFAULT_MIN_DISPLAY,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ClassifierConfig {
    /// Replace the classification endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the minimum display duration.
    #[must_use]
    pub const fn with_min_display(mut self, min_display: Duration) -> Self {
        self.min_display = min_display;
        self
    }

    /// Replace the upload size ceiling.
    #[must_use]
    pub const fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
