use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::session::AuthEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub text: String,
}

/// Append-only chat history per user, held in memory for the session only.
#[derive(Default)]
pub struct ChatTranscripts {
    inner: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl ChatTranscripts {
    pub async fn append_exchange(&self, uid: &str, query: &str, reply: &str) {
        let mut inner = self.inner.write().await;
        let transcript = inner.entry(uid.to_string()).or_default();
        transcript.push(ChatMessage {
            speaker: Speaker::User,
            text: query.to_string(),
        });
        transcript.push(ChatMessage {
            speaker: Speaker::Bot,
            text: reply.to_string(),
        });
    }

    pub async fn get(&self, uid: &str) -> Vec<ChatMessage> {
        self.inner.read().await.get(uid).cloned().unwrap_or_default()
    }

    pub async fn clear(&self, uid: &str) {
        self.inner.write().await.remove(uid);
    }

    /// Drops a user's transcript when they sign out. Ends when the session
    /// context is torn down.
    pub fn spawn_sign_out_listener(
        self: Arc<Self>,
        mut events: broadcast::Receiver<AuthEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthEvent::SignedOut { uid }) => {
                        debug!("Clearing chat transcript for {uid}");
                        self.clear(&uid).await;
                    }
                    Ok(AuthEvent::SignedIn(_)) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Transcript listener skipped {skipped} auth events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            info!("Transcript sign-out listener stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exchange_appends_user_then_bot() {
        let transcripts = ChatTranscripts::default();
        transcripts.append_exchange("u1", "hi", "Hello!").await;
        transcripts.append_exchange("u1", "bye", "Goodbye!").await;

        let history = transcripts.get("u1").await;
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].speaker, Speaker::User);
        assert_eq!(history[1].text, "Hello!");
        assert!(transcripts.get("u2").await.is_empty());
    }

    #[test]
    fn test_message_serializes_type_field() {
        let msg = ChatMessage {
            speaker: Speaker::Bot,
            text: "ok".to_string(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "bot");
    }

    #[tokio::test]
    async fn test_sign_out_event_clears_transcript() {
        let transcripts = Arc::new(ChatTranscripts::default());
        transcripts.append_exchange("u1", "hi", "Hello!").await;

        let (tx, rx) = broadcast::channel(8);
        let handle = transcripts.clone().spawn_sign_out_listener(rx);
        tx.send(AuthEvent::SignedOut {
            uid: "u1".to_string(),
        })
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert!(transcripts.get("u1").await.is_empty());
    }
}
