pub mod error;
pub mod mock;
pub mod watson;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

pub use error::ClassifyError;

/// The five emotions the upstream model scores.
///
/// Declaration order doubles as the tie-break priority: when two emotions
/// share the maximum score, the one listed first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    /// Key used for this emotion in the upstream response.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-emotion intensities, as reported upstream. Not renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmotionScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    fn set(&mut self, emotion: Emotion, value: f64) {
        match emotion {
            Emotion::Anger => self.anger = value,
            Emotion::Disgust => self.disgust = value,
            Emotion::Fear => self.fear = value,
            Emotion::Joy => self.joy = value,
            Emotion::Sadness => self.sadness = value,
        }
    }

    /// Highest-scoring emotion; ties go to the earliest in [`Emotion::ALL`].
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        for emotion in &Emotion::ALL[1..] {
            if self.get(*emotion) > self.get(best) {
                best = *emotion;
            }
        }
        best
    }
}

/// Outcome of a single classification. Either everything is known or nothing is.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Classified {
        scores: EmotionScores,
        dominant: Emotion,
    },
    Unclassified,
}

impl Classification {
    /// Build a classified result, deriving the dominant emotion from the scores.
    pub fn from_scores(scores: EmotionScores) -> Self {
        Classification::Classified {
            dominant: scores.dominant(),
            scores,
        }
    }

    pub fn dominant(&self) -> Option<Emotion> {
        match self {
            Classification::Classified { dominant, .. } => Some(*dominant),
            Classification::Unclassified => None,
        }
    }

    pub fn scores(&self) -> Option<&EmotionScores> {
        match self {
            Classification::Classified { scores, .. } => Some(scores),
            Classification::Unclassified => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Classification::Classified { .. })
    }
}

/// Raw reply from the upstream service, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends text to an emotion-prediction service. Swappable so the
/// interpretation logic can run without a network.
#[async_trait]
pub trait ClassificationTransport: Send + Sync {
    async fn send(&self, text: &str) -> Result<TransportResponse>;
}

/// Turns text into a [`Classification`] using a transport.
///
/// Stateless apart from the shared transport; clones are cheap and may be
/// used from any number of tasks at once.
#[derive(Clone)]
pub struct EmotionDetector {
    transport: Arc<dyn ClassificationTransport>,
}

impl EmotionDetector {
    pub fn new(transport: Arc<dyn ClassificationTransport>) -> Self {
        Self { transport }
    }

    /// Classify `text`. Never fails: every error path yields `Unclassified`.
    ///
    /// Blank input short-circuits without touching the transport. Otherwise
    /// exactly one request is sent, with no retry.
    pub async fn classify(&self, text: &str) -> Classification {
        match self.try_classify(text).await {
            Ok(classification) => {
                if let Some(dominant) = classification.dominant() {
                    debug!(%dominant, "classified text");
                }
                classification
            }
            Err(ClassifyError::BlankInput) => {
                debug!("skipping blank input");
                Classification::Unclassified
            }
            Err(e) => {
                warn!(error = %e, "classification unavailable");
                Classification::Unclassified
            }
        }
    }

    async fn try_classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::BlankInput);
        }
        let response = self
            .transport
            .send(text)
            .await
            .map_err(ClassifyError::Transport)?;
        interpret(&response)
    }
}

/// Interpret an upstream reply.
///
/// Only HTTP 400 is treated as a rejection; any other status falls through
/// to body parsing, where error pages fail on shape.
pub(crate) fn interpret(response: &TransportResponse) -> Result<Classification, ClassifyError> {
    if response.status == 400 {
        return Err(ClassifyError::Rejected);
    }
    if !(200..300).contains(&response.status) {
        warn!(status = response.status, "unexpected upstream status");
    }

    let value: Value = serde_json::from_str(&response.body)?;

    let first = value
        .get("emotionPredictions")
        .and_then(Value::as_array)
        .and_then(|predictions| predictions.first())
        .ok_or(ClassifyError::MissingPredictions)?;

    let mapping = first
        .get("emotion")
        .and_then(Value::as_object)
        .ok_or(ClassifyError::MissingEmotion)?;

    let mut scores = EmotionScores::default();
    let mut known = 0;
    for emotion in Emotion::ALL {
        // Absent keys stay at zero.
        if let Some(raw) = mapping.get(emotion.as_str()) {
            let score = raw
                .as_f64()
                .ok_or(ClassifyError::NonNumericScore(emotion))?;
            scores.set(emotion, score);
            known += 1;
        }
    }

    if known == 0 {
        return Err(ClassifyError::NoKnownEmotions);
    }

    Ok(Classification::from_scores(scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> TransportResponse {
        TransportResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    fn scores(anger: f64, disgust: f64, fear: f64, joy: f64, sadness: f64) -> EmotionScores {
        EmotionScores {
            anger,
            disgust,
            fear,
            joy,
            sadness,
        }
    }

    #[test]
    fn dominant_picks_single_maximum() {
        assert_eq!(scores(0.1, 0.2, 0.9, 0.3, 0.0).dominant(), Emotion::Fear);
        assert_eq!(scores(0.1, 0.2, 0.3, 0.4, 0.5).dominant(), Emotion::Sadness);
    }

    #[test]
    fn dominant_tie_prefers_earlier_emotion() {
        assert_eq!(scores(0.0, 0.5, 0.0, 0.5, 0.0).dominant(), Emotion::Disgust);
        assert_eq!(scores(0.3, 0.3, 0.3, 0.3, 0.3).dominant(), Emotion::Anger);
        assert_eq!(scores(0.0, 0.0, 0.0, 0.7, 0.7).dominant(), Emotion::Joy);
    }

    #[test]
    fn emotion_keys_match_upstream_names() {
        let names: Vec<&str> = Emotion::ALL.iter().map(Emotion::as_str).collect();
        assert_eq!(names, ["anger", "disgust", "fear", "joy", "sadness"]);
        assert_eq!(Emotion::Sadness.to_string(), "sadness");
    }

    #[test]
    fn classification_accessors() {
        let c = Classification::from_scores(scores(0.0, 0.0, 0.0, 1.0, 0.0));
        assert!(c.is_classified());
        assert_eq!(c.dominant(), Some(Emotion::Joy));
        assert_eq!(c.scores().unwrap().joy, 1.0);

        let u = Classification::Unclassified;
        assert!(!u.is_classified());
        assert!(u.dominant().is_none());
        assert!(u.scores().is_none());
    }

    #[test]
    fn interpret_full_mapping() {
        let body = r#"{"emotionPredictions": [{"emotion": {
            "anger": 0.01, "disgust": 0.02, "fear": 0.03, "joy": 0.95, "sadness": 0.04
        }}]}"#;
        let c = interpret(&ok(body)).unwrap();
        assert_eq!(
            c,
            Classification::Classified {
                scores: scores(0.01, 0.02, 0.03, 0.95, 0.04),
                dominant: Emotion::Joy,
            }
        );
    }

    #[test]
    fn interpret_defaults_missing_keys_to_zero() {
        let body = r#"{"emotionPredictions": [{"emotion": {"fear": 0.4, "joy": 0.2}}]}"#;
        let c = interpret(&ok(body)).unwrap();
        let s = c.scores().unwrap();
        assert_eq!(s.anger, 0.0);
        assert_eq!(s.disgust, 0.0);
        assert_eq!(s.sadness, 0.0);
        assert_eq!(s.fear, 0.4);
        assert_eq!(c.dominant(), Some(Emotion::Fear));
    }

    #[test]
    fn interpret_accepts_integer_scores() {
        let body = r#"{"emotionPredictions": [{"emotion": {"anger": 1, "joy": 0}}]}"#;
        let c = interpret(&ok(body)).unwrap();
        assert_eq!(c.dominant(), Some(Emotion::Anger));
        assert_eq!(c.scores().unwrap().anger, 1.0);
    }

    #[test]
    fn interpret_ignores_unknown_keys() {
        let body = r#"{"emotionPredictions": [{"emotion": {"surprise": 0.99, "joy": 0.1}}]}"#;
        let c = interpret(&ok(body)).unwrap();
        assert_eq!(c.dominant(), Some(Emotion::Joy));
    }

    #[test]
    fn interpret_uses_first_prediction_only() {
        let body = r#"{"emotionPredictions": [
            {"emotion": {"sadness": 0.8}},
            {"emotion": {"anger": 0.9}}
        ]}"#;
        assert_eq!(interpret(&ok(body)).unwrap().dominant(), Some(Emotion::Sadness));
    }

    #[test]
    fn interpret_400_is_rejected_regardless_of_body() {
        let response = TransportResponse {
            status: 400,
            body: r#"{"emotionPredictions": [{"emotion": {"joy": 1.0}}]}"#.to_string(),
        };
        assert!(matches!(interpret(&response), Err(ClassifyError::Rejected)));
    }

    #[test]
    fn interpret_non_json_body() {
        let result = interpret(&ok("<html>oops</html>"));
        assert!(matches!(result, Err(ClassifyError::MalformedJson(_))));
    }

    #[test]
    fn interpret_missing_or_empty_predictions() {
        assert!(matches!(
            interpret(&ok("{}")),
            Err(ClassifyError::MissingPredictions)
        ));
        assert!(matches!(
            interpret(&ok(r#"{"emotionPredictions": []}"#)),
            Err(ClassifyError::MissingPredictions)
        ));
        assert!(matches!(
            interpret(&ok(r#"{"emotionPredictions": null}"#)),
            Err(ClassifyError::MissingPredictions)
        ));
        assert!(matches!(
            interpret(&ok("[1, 2, 3]")),
            Err(ClassifyError::MissingPredictions)
        ));
    }

    #[test]
    fn interpret_missing_emotion_mapping() {
        let result = interpret(&ok(r#"{"emotionPredictions": [{"target": "x"}]}"#));
        assert!(matches!(result, Err(ClassifyError::MissingEmotion)));
    }

    #[test]
    fn interpret_empty_emotion_mapping() {
        let result = interpret(&ok(r#"{"emotionPredictions": [{"emotion": {}}]}"#));
        assert!(matches!(result, Err(ClassifyError::NoKnownEmotions)));
    }

    #[test]
    fn interpret_non_numeric_score() {
        let result = interpret(&ok(
            r#"{"emotionPredictions": [{"emotion": {"joy": "high"}}]}"#,
        ));
        assert!(matches!(
            result,
            Err(ClassifyError::NonNumericScore(Emotion::Joy))
        ));
    }

    #[test]
    fn interpret_server_error_page_fails_on_shape() {
        let response = TransportResponse {
            status: 503,
            body: r#"{"error": "unavailable"}"#.to_string(),
        };
        assert!(matches!(
            interpret(&response),
            Err(ClassifyError::MissingPredictions)
        ));
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert!(ClassifyError::Rejected.to_string().contains("400"));
        assert!(
            ClassifyError::NonNumericScore(Emotion::Fear)
                .to_string()
                .contains("fear")
        );
        let transport = ClassifyError::Transport(anyhow::anyhow!("connection refused"));
        assert!(transport.to_string().contains("connection refused"));
    }
}
