//! Project-wide constants.

use std::time::Duration;

/// Watson NLP EmotionPredict endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";

/// Header that selects the model on the upstream service.
pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";

/// Default model id sent in [`MODEL_ID_HEADER`].
pub const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

/// Upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Address the HTTP server listens on when none is given.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Largest POST body the detector endpoint buffers. Larger bodies count as empty text.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Body returned whenever no dominant emotion could be determined.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid Input! Please try again.";
