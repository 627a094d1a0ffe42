//! Mapping from a classify outcome to what the result panel shows.

use crate::classify::{Classification, ClassifyError, Outcome};
use crate::session::Session;

/// Text shown in both fields before any outcome exists.
pub const PLACEHOLDER: &str = "---";

/// Label shown for every failure.
pub const ERROR_LABEL: &str = "Error";

const CAT_MARKERS: &[&str] = &["cat", "🐱", "🐈"];
const DOG_MARKERS: &[&str] = &["dog", "🐶", "🐕"];

/// Visual treatment of the result label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    /// Placeholder, or a cat/dog answer naming neither.
    #[default]
    Neutral,
    /// The message mentions a cat.
    Cat,
    /// The message mentions a dog.
    Dog,
    /// The classifier saw neither a cat nor a dog.
    Unknown,
    /// The request failed.
    Error,
}

impl LabelStyle {
    /// CSS class applied to the label element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }

    /// Style for a positive cat-or-dog message.
    ///
    /// Case-insensitive substring match on the word or its emoji; cat is
    /// checked first.
    #[must_use]
    pub fn for_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        let mentions = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));
        if mentions(CAT_MARKERS) {
            Self::Cat
        } else if mentions(DOG_MARKERS) {
            Self::Dog
        } else {
            Self::Neutral
        }
    }
}

/// One row of the secondary predictions list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRow {
    /// Label with underscores shown as spaces.
    pub label: String,
    /// Formatted like the main confidence.
    pub confidence_text: String,
}

/// Everything the result panel displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    /// Main label text.
    pub label: String,
    /// Confidence percentage, or the failure message.
    pub confidence_text: String,
    /// Width of the confidence bar in percent, within `0.0..=100.0`.
    pub indicator_percent: f64,
    /// Label styling.
    pub style: LabelStyle,
    /// Top guesses, empty unless the request succeeded.
    pub predictions: Vec<PredictionRow>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl ResultView {
    /// The reset state: `---` everywhere, neutral, empty bar.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            label: PLACEHOLDER.to_owned(),
            confidence_text: PLACEHOLDER.to_owned(),
            indicator_percent: 0.0,
            style: LabelStyle::Neutral,
            predictions: Vec::new(),
        }
    }

    /// Render a classify outcome.
    #[must_use]
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Ok(classification) => Self::from_classification(classification),
            Err(error) => Self::from_error(error),
        }
    }

    /// Render whatever the session currently holds: the placeholder with
    /// no image or no outcome yet, otherwise the last outcome.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        match (session.image(), session.outcome()) {
            (Some(_), Some(outcome)) => Self::from_outcome(outcome),
            _ => Self::placeholder(),
        }
    }

    fn from_classification(classification: &Classification) -> Self {
        let style = if classification.is_cat_or_dog {
            LabelStyle::for_message(&classification.message)
        } else {
            LabelStyle::Unknown
        };
        Self {
            label: classification.message.clone(),
            confidence_text: format_confidence(classification.confidence),
            indicator_percent: indicator_percent(classification.confidence),
            style,
            predictions: classification
                .predictions
                .iter()
                .map(|p| PredictionRow {
                    label: p.label.replace('_', " "),
                    confidence_text: format_confidence(p.confidence),
                })
                .collect(),
        }
    }

    fn from_error(error: &ClassifyError) -> Self {
        Self {
            label: ERROR_LABEL.to_owned(),
            confidence_text: error.user_message(),
            indicator_percent: 0.0,
            style: LabelStyle::Error,
            predictions: Vec::new(),
        }
    }

    /// CSS width for the confidence bar, e.g. `97%`.
    #[must_use]
    pub fn indicator_width(&self) -> String {
        let rounded = (self.indicator_percent * 100.0).round() / 100.0;
        format!("{rounded}%")
    }
}

/// `0.97` -> `97.00%`.
#[must_use]
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Confidence as a bar width, clamped to `0.0..=100.0`.
#[must_use]
pub fn indicator_percent(confidence: f64) -> f64 {
    let percent = confidence * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::classify::Prediction;

    fn classified(is_cat_or_dog: bool, message: &str, confidence: f64) -> Outcome {
        Ok(Classification {
            is_cat_or_dog,
            message: message.to_owned(),
            confidence,
            predictions: Vec::new(),
        })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cat_answer() {
        let view = ResultView::from_outcome(&classified(true, "It's a Cat! 🐱", 0.97));
        assert_eq!(view.label, "It's a Cat! 🐱");
        assert_eq!(view.style, LabelStyle::Cat);
        assert_eq!(view.confidence_text, "97.00%");
        assert!(close(view.indicator_percent, 97.0));
        assert_eq!(view.indicator_width(), "97%");
    }

    #[test]
    fn dog_answer_by_word_or_emoji() {
        let by_word = ResultView::from_outcome(&classified(true, "A good DOG", 0.5));
        assert_eq!(by_word.style, LabelStyle::Dog);
        let by_emoji = ResultView::from_outcome(&classified(true, "Woof 🐶", 0.5));
        assert_eq!(by_emoji.style, LabelStyle::Dog);
    }

    #[test]
    fn cat_or_dog_without_keyword_is_neutral() {
        let view = ResultView::from_outcome(&classified(true, "golden_retriever", 0.61));
        assert_eq!(view.style, LabelStyle::Neutral);
        assert_eq!(view.confidence_text, "61.00%");
    }

    #[test]
    fn neither_answer_is_unknown() {
        let view = ResultView::from_outcome(&classified(false, "Neither cat nor dog", 0.4));
        assert_eq!(view.label, "Neither cat nor dog");
        assert_eq!(view.style, LabelStyle::Unknown);
        assert_eq!(view.confidence_text, "40.00%");
        assert!(close(view.indicator_percent, 40.0));
    }

    #[test]
    fn server_error_renders_message_in_confidence_field() {
        let view = ResultView::from_outcome(&Err(ClassifyError::Server {
            status: 400,
            message: Some("bad image".to_owned()),
        }));
        assert_eq!(view.label, "Error");
        assert_eq!(view.style, LabelStyle::Error);
        assert_eq!(view.confidence_text, "bad image");
        assert!(close(view.indicator_percent, 0.0));
        assert!(view.predictions.is_empty());
    }

    #[test]
    fn indicator_clamps_out_of_range_confidence() {
        let high = ResultView::from_outcome(&classified(true, "cat", 1.4));
        assert!(close(high.indicator_percent, 100.0));
        assert_eq!(high.indicator_width(), "100%");
        assert_eq!(high.confidence_text, "140.00%");

        let low = ResultView::from_outcome(&classified(true, "cat", -0.2));
        assert!(close(low.indicator_percent, 0.0));
        assert!(close(indicator_percent(f64::NAN), 0.0));
    }

    #[test]
    fn placeholder_is_neutral_dashes() {
        let view = ResultView::placeholder();
        assert_eq!(view.label, "---");
        assert_eq!(view.confidence_text, "---");
        assert_eq!(view.style, LabelStyle::Neutral);
        assert_eq!(view.indicator_width(), "0%");
        assert_eq!(view, ResultView::default());
    }

    #[test]
    fn predictions_are_formatted() {
        let view = ResultView::from_outcome(&Ok(Classification {
            is_cat_or_dog: true,
            message: "tabby cat".to_owned(),
            confidence: 0.5,
            predictions: vec![Prediction {
                label: "tiger_cat".to_owned(),
                confidence: 0.125,
            }],
        }));
        assert_eq!(
            view.predictions,
            vec![PredictionRow {
                label: "tiger cat".to_owned(),
                confidence_text: "12.50%".to_owned(),
            }]
        );
    }

    #[test]
    fn css_classes() {
        assert_eq!(LabelStyle::Cat.css_class(), "cat");
        assert_eq!(LabelStyle::Unknown.css_class(), "unknown");
        assert_eq!(LabelStyle::Error.css_class(), "error");
    }
}
