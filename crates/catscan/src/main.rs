use catscan_core::{
    Action, ClassifierConfig, ImagePayload, Phase, ResultView, Session, run_classification,
    shortcut,
};
use catscan_io::picker;
use catscan_io::{
    BrowserTimer, ClassifyButton, FetchTransport, FileUpload, ImagePreview, ProcessingOverlay,
    ResultPanel,
};
use dioxus::prelude::*;

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the single [`Session`] signal and wires together the upload
/// zone, preview, classify button, result panel, and keyboard shortcuts.
fn app() -> Element {
    // --- Application state ---
    let config = use_signal(ClassifierConfig::default);
    let mut session = use_signal(Session::new);

    // --- Upload / remove handlers ---
    let on_upload = move |payload: ImagePayload| {
        if let Err(e) = session.write().load(payload) {
            tracing::warn!(error = %e, "upload ignored");
        }
    };

    let mut remove = move || {
        if let Err(e) = session.write().remove() {
            tracing::debug!(error = %e, "remove ignored");
        }
    };

    // --- Classify ---
    // `begin_classify` refuses while a request is in flight.
    // `run_classification` never fails, so `complete` always runs.
    let mut classify = move || {
        let ticket = match session.write().begin_classify() {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::debug!(error = %e, "classify ignored");
                return;
            }
        };
        let ClassifierConfig {
            endpoint,
            min_display,
            ..
        } = config();

        spawn(async move {
            let transport = FetchTransport::new(endpoint);
            let outcome =
                run_classification(&transport, &BrowserTimer, ticket.request(), min_display)
                    .await;
            session.write().complete(ticket, outcome);
        });
    };

    // --- Keyboard shortcuts ---
    let on_key = move |evt: KeyboardEvent| {
        let phase = session.read().phase();
        let Some(action) = shortcut(&evt.key().to_string(), phase) else {
            return;
        };
        evt.prevent_default();
        match action {
            Action::OpenPicker => {
                if let Err(e) = picker::open_file_picker() {
                    tracing::warn!(error = %e, "could not open file picker");
                }
            }
            Action::Classify => classify(),
            Action::Remove => remove(),
        }
    };

    let (phase, image, view) = {
        let current = session.read();
        (
            current.phase(),
            current.image().cloned(),
            ResultView::for_session(&current),
        )
    };
    let requesting = phase == Phase::Requesting;

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div {
            class: "app",
            tabindex: "0",
            autofocus: true,
            onkeydown: on_key,

            header { class: "app-header",
                h1 { "catscan" }
                p { class: "tagline", "Is it a cat or a dog? Upload a photo to find out." }
            }

            main { class: "layout",
                div { class: "stage",
                    if let Some(payload) = image {
                        div { class: "preview-frame",
                            ImagePreview {
                                payload: payload,
                                locked: requesting,
                                on_remove: move |()| remove(),
                            }
                            ProcessingOverlay { visible: requesting }
                        }
                    } else {
                        FileUpload {
                            max_upload_bytes: config.read().max_upload_bytes,
                            on_upload: on_upload,
                        }
                    }

                    ClassifyButton {
                        enabled: phase == Phase::Loaded,
                        processing: requesting,
                        on_classify: move |()| classify(),
                    }
                }

                ResultPanel { view: view }
            }

            footer { class: "app-footer",
                p { "Shortcuts: O to open a file, Enter to classify, Esc to remove" }
            }
        }
    }
}
