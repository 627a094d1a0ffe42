//! File upload component with drag-and-drop and file picker.

use catscan_core::upload::{self, Candidate, ImagePayload};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;

use crate::picker::FILE_INPUT_ID;

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Files larger than this many bytes are rejected before reading.
    max_upload_bytes: u64,
    /// Called with the encoded image after a successful upload.
    on_upload: EventHandler<ImagePayload>,
}

/// A drag-and-drop zone with a file picker button.
///
/// Accepts JPEG, PNG, GIF, and WebP images up to `max_upload_bytes`.
/// When a file is selected (via the picker or drag-and-drop), checks its
/// type and size, reads and encodes it, and fires `on_upload` with the
/// resulting payload. Rejections are shown inline and never reach the
/// caller.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let max_upload_bytes = props.max_upload_bytes;

    // Validate, read, encode, and forward the first file from a list.
    //
    // Shared by the file-picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };

        let name = file.name();
        let declared_type = file.content_type();
        let candidate = Candidate {
            name: &name,
            declared_type: declared_type.as_deref(),
            size: file.size(),
        };
        let media_type = match upload::validate(&candidate, max_upload_bytes) {
            Ok(media_type) => media_type,
            Err(e) => {
                tracing::info!(file = %name, error = %e, "upload rejected");
                error.set(Some(e.to_string()));
                return;
            }
        };

        let encoded = match file.read_bytes().await {
            Ok(bytes) => upload::encode(&name, &bytes, media_type, max_upload_bytes),
            Err(e) => Err(upload::UploadError::Decode(e.to_string())),
        };
        match encoded {
            Ok(payload) => {
                error.set(None);
                props.on_upload.call(payload);
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "upload failed");
                error.set(Some(e.to_string()));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() { "drop-zone dragging" } else { "drop-zone" };
    let accept = upload::accept_attribute();
    let limit_mib = max_upload_bytes / (1024 * 1024);

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            div { class: "drop-zone-icon",
                Icon { width: 40, height: 40, icon: LdUpload }
            }

            if let Some(ref err) = error() {
                p { class: "upload-error", role: "alert", "{err}" }
            }

            p { class: "drop-zone-hint", "Drop an image here or " }

            label { class: "btn btn-primary",
                input {
                    r#type: "file",
                    id: FILE_INPUT_ID,
                    accept: "{accept}",
                    class: "hidden",
                    onchange: handle_files,
                }
                "Choose File"
            }

            p { class: "drop-zone-formats", "JPEG, PNG, GIF, WebP (max {limit_mib} MiB)" }
            p { class: "drop-zone-shortcut", "Press O to browse" }
        }
    }
}
