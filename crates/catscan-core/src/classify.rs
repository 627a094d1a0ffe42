//! One classification request and the interpretation of its reply.
//!
//! [`run_classification`] posts the session image through a
//! [`Transport`] and, concurrently, waits out the configured minimum
//! display time on a [`Timer`]. It resolves only when both are done and
//! never returns an error to its caller: transport failures, non-2xx
//! statuses, and unreadable bodies all become the `Err` side of the
//! returned [`Outcome`], so the session can always be released.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// Label shown when the classifier omits `message`.
pub const DEFAULT_MESSAGE: &str = "Unknown";

/// Body of the classification request: `{"image": "<data URI>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRequest {
    /// The session image as a `data:` URI.
    pub image: String,
}

/// Status and body text of an HTTP reply, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text (possibly empty).
    pub body: String,
}

impl HttpReply {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Why a classify attempt produced no classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// The request never got an HTTP answer.
    #[error("network error: {0}")]
    Transport(String),

    /// The classifier answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the reply body, if there was one.
        message: Option<String>,
    },

    /// A 2xx reply whose body is not a JSON object.
    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),
}

impl ClassifyError {
    /// Text shown to the user in place of the confidence.
    ///
    /// A server-supplied message wins over the status-derived one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(detail) => format!("Network error: {detail}"),
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Server {
                status,
                message: None,
            } => format!("Server responded with status {status}"),
            Self::MalformedResponse(_) => "Unexpected response from the classifier".to_owned(),
        }
    }
}

/// One of the classifier's top guesses.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// ImageNet label, e.g. `golden_retriever`.
    pub label: String,
    /// Score in `0.0..=1.0` (not enforced).
    pub confidence: f64,
}

/// A successfully parsed classifier answer.
///
/// Fields the server left out, or sent with the wrong JSON type, take
/// their defaults: `false`, [`DEFAULT_MESSAGE`], `0.0`, and no
/// predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Whether the image was recognized as a cat or a dog.
    pub is_cat_or_dog: bool,
    /// Human-readable label.
    pub message: String,
    /// Score for `message`, nominally in `0.0..=1.0`.
    pub confidence: f64,
    /// Top guesses in server order.
    pub predictions: Vec<Prediction>,
}

impl Classification {
    /// Parse a 2xx reply body.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MalformedResponse`] when the body is not
    /// valid JSON or is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, ClassifyError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ClassifyError::MalformedResponse(
                "expected a JSON object".to_owned(),
            ));
        };

        Ok(Self {
            is_cat_or_dog: fields
                .get("isCatOrDog")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            message: fields
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_MESSAGE)
                .to_owned(),
            confidence: confidence_of(&fields),
            predictions: fields
                .get("predictions")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(Value::as_object)
                        .filter_map(|entry| {
                            let label = entry.get("label").and_then(Value::as_str)?;
                            Some(Prediction {
                                label: label.to_owned(),
                                confidence: confidence_of(entry),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn confidence_of(fields: &Map<String, Value>) -> f64 {
    fields
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Result of one classify attempt.
pub type Outcome = Result<Classification, ClassifyError>;

/// Turn an HTTP reply into an [`Outcome`].
///
/// # Errors
///
/// [`ClassifyError::Server`] for non-2xx statuses (carrying the body's
/// `error` string when present), [`ClassifyError::MalformedResponse`]
/// for 2xx bodies that are not a JSON object.
pub fn interpret(reply: &HttpReply) -> Outcome {
    if !reply.is_success() {
        return Err(ClassifyError::Server {
            status: reply.status,
            message: server_error_message(&reply.body),
        });
    }
    Classification::from_json(&reply.body)
}

/// Extract a non-empty `error` string from an error reply body.
fn server_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_owned())
}

/// Sends a serialized [`ClassificationRequest`] to the classifier.
///
/// Implementations own the endpoint. Any failure to obtain an HTTP
/// status is reported as [`ClassifyError::Transport`]; non-2xx statuses
/// are *not* errors at this level.
pub trait Transport {
    /// POST `body` (JSON) and return the raw reply.
    fn send(&self, body: String) -> impl Future<Output = Result<HttpReply, ClassifyError>>;
}

/// Source of the minimum-display delay.
pub trait Timer {
    /// Complete after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Run one classification, taking at least `min_display`.
///
/// The request and the timer run concurrently; the returned future
/// resolves when the slower of the two finishes.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn run_classification<T, C>(
    transport: &T,
    timer: &C,
    request: &ClassificationRequest,
    min_display: Duration,
) -> Outcome
where
    T: Transport,
    C: Timer,
{
    let started = web_time::Instant::now();

    let exchange = async {
        let body = serde_json::to_string(request)
            .map_err(|e| ClassifyError::Transport(format!("failed to encode request: {e}")))?;
        let reply = transport.send(body).await?;
        interpret(&reply)
    };
    let (outcome, ()) = futures::join!(exchange, timer.sleep(min_display));

    let elapsed = started.elapsed();
    match &outcome {
        Ok(classification) => tracing::info!(
            ?elapsed,
            is_cat_or_dog = classification.is_cat_or_dog,
            confidence = classification.confidence,
            "classification finished"
        ),
        Err(e) => tracing::warn!(?elapsed, error = %e, "classification failed"),
    }
    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use futures::future::ready;

    use super::*;

    struct StubTransport {
        reply: Result<HttpReply, ClassifyError>,
        sent: RefCell<Vec<String>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply {
                    status,
                    body: body.to_owned(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        fn send(&self, body: String) -> impl Future<Output = Result<HttpReply, ClassifyError>> {
            self.sent.borrow_mut().push(body);
            ready(self.reply.clone())
        }
    }

    #[derive(Default)]
    struct RecordingTimer {
        requested: RefCell<Vec<Duration>>,
    }

    impl Timer for RecordingTimer {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            self.requested.borrow_mut().push(duration);
            ready(())
        }
    }

    fn request() -> ClassificationRequest {
        ClassificationRequest {
            image: "data:image/png;base64,AAAA".to_owned(),
        }
    }

    #[test]
    fn request_serializes_as_image_field() {
        let json = serde_json::to_string(&request()).unwrap();
        assert_eq!(json, r#"{"image":"data:image/png;base64,AAAA"}"#);
    }

    #[test]
    fn parses_full_response() {
        let parsed = Classification::from_json(
            r#"{"isCatOrDog":true,"message":"tabby","confidence":0.83,
                "predictions":[{"label":"tabby","confidence":0.83},{"label":"tiger_cat","confidence":0.1}]}"#,
        )
        .unwrap();
        assert!(parsed.is_cat_or_dog);
        assert_eq!(parsed.message, "tabby");
        assert!((parsed.confidence - 0.83).abs() < 1e-12);
        assert_eq!(parsed.predictions.len(), 2);
        assert_eq!(parsed.predictions[1].label, "tiger_cat");
    }

    #[test]
    fn missing_and_mistyped_fields_take_defaults() {
        let parsed =
            Classification::from_json(r#"{"isCatOrDog":"yes","confidence":"high"}"#).unwrap();
        assert!(!parsed.is_cat_or_dog);
        assert_eq!(parsed.message, DEFAULT_MESSAGE);
        assert!(parsed.confidence.abs() < f64::EPSILON);
        assert!(parsed.predictions.is_empty());
    }

    #[test]
    fn predictions_without_label_are_skipped() {
        let parsed = Classification::from_json(
            r#"{"predictions":[{"confidence":0.5},"junk",{"label":"beagle"}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.predictions,
            vec![Prediction {
                label: "beagle".to_owned(),
                confidence: 0.0
            }]
        );
    }

    #[test]
    fn non_object_bodies_fail_closed() {
        for body in ["", "not json", "[1,2]", "42", "null"] {
            let err = Classification::from_json(body).unwrap_err();
            assert!(
                matches!(err, ClassifyError::MalformedResponse(_)),
                "body {body:?} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn error_status_prefers_server_message() {
        let outcome = interpret(&HttpReply {
            status: 400,
            body: r#"{"error":"bad image"}"#.to_owned(),
        });
        let err = outcome.unwrap_err();
        assert_eq!(err.user_message(), "bad image");
    }

    #[test]
    fn error_status_without_body_uses_status() {
        let err = interpret(&HttpReply {
            status: 502,
            body: "<html>Bad Gateway</html>".to_owned(),
        })
        .unwrap_err();
        assert_eq!(
            err,
            ClassifyError::Server {
                status: 502,
                message: None
            }
        );
        assert_eq!(err.user_message(), "Server responded with status 502");
    }

    #[test]
    fn success_status_range() {
        let reply = |status| HttpReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(299).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(300).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn run_sends_request_and_waits_configured_floor() {
        let transport =
            StubTransport::replying(200, r#"{"isCatOrDog":true,"message":"pug","confidence":0.5}"#);
        let timer = RecordingTimer::default();
        let floor = Duration::from_millis(1234);

        let outcome = block_on(run_classification(&transport, &timer, &request(), floor));

        assert_eq!(outcome.unwrap().message, "pug");
        assert_eq!(
            transport.sent.borrow().as_slice(),
            [r#"{"image":"data:image/png;base64,AAAA"}"#]
        );
        assert_eq!(timer.requested.borrow().as_slice(), [floor]);
    }

    #[test]
    fn run_folds_transport_failure_into_outcome() {
        let transport = StubTransport {
            reply: Err(ClassifyError::Transport("connection refused".to_owned())),
            sent: RefCell::new(Vec::new()),
        };
        let timer = RecordingTimer::default();

        let outcome = block_on(run_classification(
            &transport,
            &timer,
            &request(),
            Duration::ZERO,
        ));

        let err = outcome.unwrap_err();
        assert_eq!(err.user_message(), "Network error: connection refused");
        assert_eq!(timer.requested.borrow().len(), 1);
    }
}
