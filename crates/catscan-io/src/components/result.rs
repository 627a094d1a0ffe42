//! Result panel: label, confidence, confidence bar, and top guesses.

use catscan_core::ResultView;
use dioxus::prelude::*;

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// What to display, from [`ResultView::for_session`].
    view: ResultView,
}

/// Displays a rendered classify outcome.
///
/// The label carries the style class (`cat`, `dog`, `unknown`, `error`,
/// or `neutral`); the bar width follows `indicator_percent`.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    let view = &props.view;
    let style_class = view.style.css_class();
    let width = view.indicator_width();

    rsx! {
        section { class: "result", aria_live: "polite",
            h2 { class: "result-heading", "Result" }

            p { class: "result-label {style_class}", "{view.label}" }

            div { class: "confidence",
                span { class: "confidence-caption", "Confidence" }
                span { class: "confidence-text", "{view.confidence_text}" }
            }
            div { class: "confidence-track",
                div {
                    class: "confidence-fill {style_class}",
                    style: "width: {width}",
                }
            }

            if !view.predictions.is_empty() {
                details { class: "predictions",
                    summary { "Top predictions" }
                    ol {
                        for row in view.predictions.iter() {
                            li { key: "{row.label}",
                                span { class: "prediction-label", "{row.label}" }
                                span { class: "prediction-confidence", "{row.confidence_text}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
