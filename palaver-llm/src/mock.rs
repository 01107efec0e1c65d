//! Scripted oracle — deterministic replies for tests without a live backend.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::Oracle;
use crate::error::OracleError;
use crate::types::{ChatRequest, ChatResponse};

/// An [`Oracle`] that replays a fixed script of replies.
///
/// Replies are returned in order; once the script runs dry the last reply
/// repeats forever, so a single-entry script behaves as a fixed echo. Every
/// received request is recorded for assertions.
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedOracle {
    /// Create an oracle that replays `replies` in order.
    #[must_use]
    pub fn new(replies: Vec<impl Into<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create an oracle that always returns the same reply.
    #[must_use]
    pub fn fixed(reply: impl Into<String>) -> Self {
        Self::new(vec![reply.into()])
    }

    /// All requests received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    /// How many calls have been made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, OracleError> {
        self.requests.lock().push(request.clone());

        let next = self.replies.lock().pop_front();
        let text = match next {
            Some(reply) => {
                *self.last.lock() = Some(reply.clone());
                reply
            }
            None => self
                .last
                .lock()
                .clone()
                .ok_or_else(|| OracleError::Unavailable("empty script".into()))?,
        };

        Ok(ChatResponse {
            text,
            tokens_generated: 0,
            latency_ms: 0,
            model: "scripted".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;

    fn request(text: &str) -> ChatRequest {
        ChatRequest::new(vec![ChatMessage::user(text)], 10, 0.7)
    }

    #[tokio::test]
    async fn replies_in_script_order() {
        let oracle = ScriptedOracle::new(vec!["first", "second"]);

        let a = oracle.chat(&request("1")).await.expect("reply");
        let b = oracle.chat(&request("2")).await.expect("reply");
        assert_eq!(a.text, "first");
        assert_eq!(b.text, "second");
    }

    #[tokio::test]
    async fn exhausted_script_repeats_last_reply() {
        let oracle = ScriptedOracle::fixed("again");

        for _ in 0..3 {
            let reply = oracle.chat(&request("x")).await.expect("reply");
            assert_eq!(reply.text, "again");
        }
        assert_eq!(oracle.call_count(), 3);
    }

    #[tokio::test]
    async fn empty_script_is_unavailable() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let result = oracle.chat(&request("x")).await;
        assert!(matches!(result, Err(OracleError::Unavailable(_))));
    }

    #[tokio::test]
    async fn records_received_requests() {
        let oracle = ScriptedOracle::fixed("ok");
        oracle.chat(&request("hello")).await.expect("reply");

        let requests = oracle.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content, "hello");
    }
}
