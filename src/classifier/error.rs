use thiserror::Error;

use super::Emotion;

/// Why a text could not be classified.
///
/// None of these reach the caller of [`EmotionDetector::classify`](super::EmotionDetector::classify);
/// they exist so the collapse to `Unclassified` can be logged with a reason.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("input is empty or whitespace")]
    BlankInput,

    #[error("upstream rejected the input (HTTP 400)")]
    Rejected,

    #[error("transport failure: {0:#}")]
    Transport(anyhow::Error),

    #[error("response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("response has no emotionPredictions")]
    MissingPredictions,

    #[error("first prediction has no emotion mapping")]
    MissingEmotion,

    #[error("score for {0} is not a number")]
    NonNumericScore(Emotion),

    #[error("emotion mapping contains none of the known emotions")]
    NoKnownEmotions,
}
