use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::debug;

use crate::report;

use super::{AppState, INDEX_HTML};

const TEXT_PARAM: &str = "textToAnalyze";

#[derive(Debug, Deserialize)]
struct AnalyzeBody {
    #[serde(default)]
    text: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /emotionDetector?textToAnalyze=...`. The first `textToAnalyze` wins.
pub async fn analyze_query(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> String {
    let text = params
        .into_iter()
        .find(|(key, _)| key == TEXT_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default();
    analyze(&state, &text).await
}

/// `POST /emotionDetector` with `{"text": "..."}`.
/// Unreadable or oversized bodies count as empty text.
pub async fn analyze_body(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> String {
    let text = match body {
        Ok(body) => match serde_json::from_slice::<AnalyzeBody>(&body) {
            Ok(parsed) => parsed.text,
            Err(e) => {
                debug!(error = %e, "ignoring unreadable request body");
                String::new()
            }
        },
        Err(e) => {
            debug!(error = %e, "ignoring request body that could not be buffered");
            String::new()
        }
    };
    analyze(&state, &text).await
}

async fn analyze(state: &AppState, text: &str) -> String {
    let classification = state.detector.classify(text).await;
    report::render(&classification)
}
