use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{ClassificationTransport, TransportResponse};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(TransportResponse),
    /// Simulates a network failure with the given message.
    Fail(String),
}

impl MockReply {
    /// A 200 response whose first prediction carries `emotion` as its mapping.
    pub fn emotions(emotion: Value) -> Self {
        let body = json!({ "emotionPredictions": [{ "emotion": emotion }] });
        Self::status(200, &body.to_string())
    }

    pub fn status(status: u16, body: &str) -> Self {
        MockReply::Respond(TransportResponse {
            status,
            body: body.to_string(),
        })
    }

    pub fn fail(message: &str) -> Self {
        MockReply::Fail(message.to_string())
    }
}

/// A scripted transport for tests. Returns pre-defined replies in order and
/// records every text it was asked to send.
pub struct MockTransport {
    replies: Vec<MockReply>,
    index: AtomicUsize,
    sent: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests made so far.
    pub fn calls(&self) -> usize {
        self.sent().len()
    }

    /// Texts sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ClassificationTransport for MockTransport {
    async fn send(&self, text: &str) -> Result<TransportResponse> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.get(i).ok_or_else(|| {
            anyhow::anyhow!("MockTransport: no more replies (called {} times)", i + 1)
        })?;
        match reply {
            MockReply::Respond(response) => Ok(response.clone()),
            MockReply::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
