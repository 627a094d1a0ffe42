//! Preview of the loaded image with a remove control.

use catscan_core::ImagePayload;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;

/// Props for the [`ImagePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePreviewProps {
    /// The loaded image.
    payload: ImagePayload,
    /// Hide the remove control (a request is in flight).
    #[props(default)]
    locked: bool,
    /// Called when the user removes the image.
    on_remove: EventHandler<()>,
}

/// Shows the loaded image from its data URI, with its name and size.
#[component]
pub fn ImagePreview(props: ImagePreviewProps) -> Element {
    let src = props.payload.data_uri();
    let name = props.payload.name();
    let size = format_size(props.payload.size());
    let on_remove = props.on_remove;

    rsx! {
        div { class: "preview",
            img { class: "preview-image", src: "{src}", alt: "{name}" }

            if !props.locked {
                button {
                    class: "preview-remove",
                    title: "Remove image (Esc)",
                    aria_label: "Remove image",
                    onclick: move |_| on_remove.call(()),
                    Icon { width: 18, height: 18, icon: LdX }
                }
            }

            p { class: "preview-caption", "{name} ({size})" }
        }
    }
}

/// Human-readable file size, e.g. `512 B`, `12.3 KiB`, `4.5 MiB`.
#[allow(clippy::cast_precision_loss)] // display only
fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_pick_a_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(10 * 1024 * 1024), "10.0 MiB");
    }
}
