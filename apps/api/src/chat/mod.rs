//! Career chat assistant: local gate, completion call, transcript and narration.

pub mod gate;
pub mod handlers;
pub mod speech;
pub mod transcript;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_ASSISTANT_SYSTEM;
use crate::llm_client::LlmClient;
use gate::{evaluate, GateDecision, REFUSAL};
use speech::SpeechCapabilities;
use transcript::ChatTranscripts;

pub const COMPLETION_FAILED: &str = "Failed to fetch response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatOutcome {
    Canned,
    Refused,
    Answered,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub outcome: ChatOutcome,
    pub reply: String,
    /// Plain text for speech synthesis; absent when synthesis is unavailable.
    pub narration: Option<String>,
}

#[derive(Clone)]
pub struct ChatAssistant {
    llm: LlmClient,
    speech: SpeechCapabilities,
    transcripts: Arc<ChatTranscripts>,
}

impl ChatAssistant {
    pub fn new(llm: LlmClient, speech: SpeechCapabilities, transcripts: Arc<ChatTranscripts>) -> Self {
        Self {
            llm,
            speech,
            transcripts,
        }
    }

    pub fn transcripts(&self) -> &ChatTranscripts {
        &self.transcripts
    }

    /// Answers one query and records the exchange in the user's transcript.
    ///
    /// Fails with `Unsupported` whenever speech recognition is unavailable.
    /// Canned phrases and off-topic queries never reach the completion endpoint.
    /// A failed completion is not retried; the fixed failure text is recorded instead.
    pub async fn ask(&self, uid: &str, query: &str, via_voice: bool) -> Result<ChatReply, AppError> {
        // The assistant is voice-first: without recognition it is not offered at all.
        if !self.speech.recognition {
            return Err(AppError::Unsupported(
                "Speech recognition is not supported in this environment".to_string(),
            ));
        }
        if via_voice {
            debug!("Query arrived through speech recognition");
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("query cannot be empty".to_string()));
        }

        let (outcome, reply) = match evaluate(query) {
            GateDecision::Canned(reply) => (ChatOutcome::Canned, reply.to_string()),
            GateDecision::Refused => (ChatOutcome::Refused, REFUSAL.to_string()),
            GateDecision::Forward => {
                info!("Forwarding chat query to {}", self.llm.model());
                match self.llm.complete(CAREER_ASSISTANT_SYSTEM, query).await {
                    Ok(text) => (ChatOutcome::Answered, text),
                    Err(e) => {
                        error!("Completion failed: {e}");
                        (ChatOutcome::Failed, COMPLETION_FAILED.to_string())
                    }
                }
            }
        };

        self.transcripts.append_exchange(uid, query, &reply).await;

        Ok(ChatReply {
            outcome,
            narration: self.speech.narration(&reply),
            reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant(speech: SpeechCapabilities) -> ChatAssistant {
        // Closed port; none of these queries may reach the completion endpoint.
        let llm = LlmClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/chat/completions".to_string(),
            "key".to_string(),
            "model".to_string(),
        );
        ChatAssistant::new(llm, speech, Arc::new(ChatTranscripts::default()))
    }

    #[tokio::test]
    async fn test_without_recognition_every_query_is_unsupported() {
        let chat = assistant(SpeechCapabilities {
            recognition: false,
            synthesis: true,
        });
        for via_voice in [false, true] {
            let err = chat.ask("u", "hi", via_voice).await.unwrap_err();
            assert!(matches!(err, AppError::Unsupported(_)));
        }
        assert!(chat.transcripts().get("u").await.is_empty());
    }

    #[tokio::test]
    async fn test_canned_reply_is_recorded_and_narrated() {
        let chat = assistant(SpeechCapabilities::default());
        let reply = chat.ask("u", "Thanks", false).await.unwrap();
        assert_eq!(reply.outcome, ChatOutcome::Canned);
        assert_eq!(reply.narration.as_deref(), Some(reply.reply.as_str()));
        assert_eq!(chat.transcripts().get("u").await.len(), 2);
    }
}
