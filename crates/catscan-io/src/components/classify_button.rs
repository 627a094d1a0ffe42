//! The classify trigger.

use dioxus::prelude::*;

/// Props for the [`ClassifyButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ClassifyButtonProps {
    /// An image is loaded and no request is in flight.
    enabled: bool,
    /// A request is in flight; shows the loading state.
    processing: bool,
    /// Called when the button is pressed.
    on_classify: EventHandler<()>,
}

/// Button that submits the loaded image.
///
/// Disabled whenever `enabled` is false. The session's processing flag
/// still decides whether a submit is accepted.
#[component]
pub fn ClassifyButton(props: ClassifyButtonProps) -> Element {
    let on_classify = props.on_classify;
    let class = if props.processing {
        "btn btn-primary classify loading"
    } else {
        "btn btn-primary classify"
    };
    let label = if props.processing {
        "Classifying..."
    } else {
        "Classify Image"
    };

    rsx! {
        button {
            class: "{class}",
            disabled: !props.enabled,
            title: "Classify (Enter)",
            "aria-busy": "{props.processing}",
            onclick: move |_| on_classify.call(()),
            if props.processing {
                span { class: "spinner" }
            }
            "{label}"
        }
    }
}
