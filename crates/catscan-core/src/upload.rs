//! Upload validation and data-URI encoding.
//!
//! A picked or dropped file is checked twice: once from the metadata the
//! browser reports ([`validate`]), before any bytes are read, and once
//! after reading ([`encode`]), which re-checks the byte length, sniffs the
//! media type when the browser declared none, and produces the
//! `data:<mime>;base64,<payload>` string the classifier expects.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Media types the classifier accepts, in canonical lowercase form.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Errors that keep a file from becoming the session image.
///
/// None of these mutate the [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The declared (or sniffed) media type is not on the allow-list.
    #[error("Unsupported file type: {media_type}. Choose a JPEG, PNG, GIF, or WebP image.")]
    UnsupportedType {
        /// The offending media type, or `"unknown"` if none could be found.
        media_type: String,
    },

    /// The file exceeds the configured size ceiling.
    #[error("File is too large ({:.1} MiB). The limit is {:.0} MiB.", mib(.size), mib(.limit))]
    TooLarge {
        /// Reported size of the file in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },

    /// The file could not be read into a payload.
    #[error("Failed to read file: {0}")]
    Decode(String),

    /// A classification is in flight; the image cannot change until it ends.
    #[error("Cannot change the image while classification is in progress")]
    Busy,
}

#[allow(clippy::cast_precision_loss, clippy::trivially_copy_pass_by_ref)] // display only
fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

/// Metadata the browser reports for a picked or dropped file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// File name, used only for display.
    pub name: &'a str,
    /// Declared media type. `None` or an empty string means the browser
    /// did not know it.
    pub declared_type: Option<&'a str>,
    /// Size in bytes as reported before reading.
    pub size: u64,
}

/// A validated image, encoded and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data_uri: String,
    name: String,
    size: u64,
    media_type: &'static str,
}

impl ImagePayload {
    /// The `data:` URI carried in the request body and used as the
    /// preview `src`. Never empty.
    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the raw (pre-encoding) file in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Canonical media type, one of [`ALLOWED_MEDIA_TYPES`].
    #[must_use]
    pub const fn media_type(&self) -> &'static str {
        self.media_type
    }
}

/// Value for the file input's `accept` attribute.
#[must_use]
pub fn accept_attribute() -> String {
    ALLOWED_MEDIA_TYPES.join(",")
}

/// Lowercase a media type, drop any parameters, and fold `image/jpg`
/// into `image/jpeg`.
#[must_use]
pub fn normalize_media_type(raw: &str) -> String {
    let essence = raw.split(';').next().unwrap_or_default().trim();
    let lower = essence.to_ascii_lowercase();
    if lower == "image/jpg" {
        "image/jpeg".to_owned()
    } else {
        lower
    }
}

/// Look up a media type on the allow-list.
fn allowed(media_type: &str) -> Option<&'static str> {
    let normalized = normalize_media_type(media_type);
    ALLOWED_MEDIA_TYPES
        .iter()
        .copied()
        .find(|allowed| *allowed == normalized)
}

/// Check a file's reported metadata before reading it.
///
/// Returns the canonical media type, or `None` when the browser declared
/// no type and the bytes must be sniffed by [`encode`].
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedType`] for a declared type outside
/// the allow-list and [`UploadError::TooLarge`] when `size` exceeds
/// `max_upload_bytes`.
pub fn validate(
    candidate: &Candidate<'_>,
    max_upload_bytes: u64,
) -> Result<Option<&'static str>, UploadError> {
    let media_type = match candidate.declared_type.map(str::trim) {
        None | Some("") => None,
        Some(declared) => Some(allowed(declared).ok_or_else(|| UploadError::UnsupportedType {
            media_type: normalize_media_type(declared),
        })?),
    };

    if candidate.size > max_upload_bytes {
        return Err(UploadError::TooLarge {
            size: candidate.size,
            limit: max_upload_bytes,
        });
    }

    Ok(media_type)
}

/// Encode file bytes as an [`ImagePayload`].
///
/// `media_type` is the result of [`validate`]; when it is `None` the
/// format is guessed from the file's magic bytes.
///
/// # Errors
///
/// Returns [`UploadError::Decode`] for an empty file,
/// [`UploadError::TooLarge`] if the bytes exceed the ceiling after all,
/// and [`UploadError::UnsupportedType`] when sniffing finds no allowed
/// format.
pub fn encode(
    name: &str,
    bytes: &[u8],
    media_type: Option<&'static str>,
    max_upload_bytes: u64,
) -> Result<ImagePayload, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Decode(format!("{name} is empty")));
    }

    let size = bytes.len() as u64;
    if size > max_upload_bytes {
        return Err(UploadError::TooLarge {
            size,
            limit: max_upload_bytes,
        });
    }

    let media_type = match media_type {
        Some(media_type) => media_type,
        None => sniff(bytes)?,
    };

    let data_uri = format!("data:{media_type};base64,{}", STANDARD.encode(bytes));
    Ok(ImagePayload {
        data_uri,
        name: name.to_owned(),
        size,
        media_type,
    })
}

/// Guess an allowed media type from magic bytes.
fn sniff(bytes: &[u8]) -> Result<&'static str, UploadError> {
    let format = image::guess_format(bytes).map_err(|_| UploadError::UnsupportedType {
        media_type: "unknown".to_owned(),
    })?;
    allowed(format.to_mime_type()).ok_or_else(|| UploadError::UnsupportedType {
        media_type: format.to_mime_type().to_owned(),
    })
}
