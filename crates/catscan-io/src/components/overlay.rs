//! Translucent overlay shown over the preview while classifying.

use dioxus::prelude::*;

/// Covers its positioned parent with a spinner and a status line.
#[component]
pub fn ProcessingOverlay(visible: bool) -> Element {
    rsx! {
        if visible {
            div { class: "processing-overlay", role: "status",
                span { class: "spinner spinner-large" }
                p { "Analyzing image..." }
            }
        }
    }
}
