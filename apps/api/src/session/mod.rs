//! Session context: the explicit owner of sign-in state.
//!
//! Created once at startup and handed to consumers through `AppState`.
//! Auth-state changes are published on a broadcast channel; `teardown()`
//! drops all cached sessions and closes that channel.

pub mod extractor;
pub mod handlers;
pub mod identity;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::errors::AppError;
use identity::{AuthSession, AuthUser, IdentityClient, IdentityError, OAuthCredential};

/// How long a token verified through `lookup` is trusted without asking again.
const LOOKUP_CACHE_TTL: Duration = Duration::from_secs(300);
const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(AuthUser),
    SignedOut { uid: String },
}

struct CachedSession {
    user: AuthUser,
    expires_at: Instant,
}

pub struct SessionContext {
    identity: IdentityClient,
    oauth_request_uri: String,
    sessions: RwLock<HashMap<String, CachedSession>>,
    events: Mutex<Option<broadcast::Sender<AuthEvent>>>,
    closed: AtomicBool,
}

impl SessionContext {
    pub fn new(identity: IdentityClient, oauth_request_uri: String) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            identity,
            oauth_request_uri,
            sessions: RwLock::new(HashMap::new()),
            events: Mutex::new(Some(tx)),
            closed: AtomicBool::new(false),
        }
    }

    /// Auth-state change notifications. The receiver reports `Closed` after `teardown()`.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        let guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(tx) => tx.subscribe(),
            None => {
                // Already torn down: hand out a receiver whose sender is gone.
                let (_, rx) = broadcast::channel(1);
                rx
            }
        }
    }

    fn publish(&self, event: AuthEvent) {
        let guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = guard.as_ref() {
            // No subscribers is fine.
            let _ = tx.send(event);
        }
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }

    /// Caches a verified token, evicting every expired entry first so the
    /// map only holds live sessions.
    async fn cache(&self, id_token: &str, user: AuthUser, ttl: Duration) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, cached| cached.expires_at > now);
        sessions.insert(
            id_token.to_string(),
            CachedSession {
                user,
                expires_at: now + ttl,
            },
        );
    }

    async fn remember(&self, session: &AuthSession) {
        let ttl = Duration::from_secs(session.expires_in_secs);
        self.cache(&session.id_token, session.user.clone(), ttl).await;
        info!("User {} signed in", session.user.uid);
        self.publish(AuthEvent::SignedIn(session.user.clone()));
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        self.ensure_open()?;
        let session = self.identity.sign_up(email, password).await?;
        self.remember(&session).await;
        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        self.ensure_open()?;
        let session = self.identity.sign_in_with_password(email, password).await?;
        self.remember(&session).await;
        Ok(session)
    }

    pub async fn sign_in_with_oauth(
        &self,
        credential: &OAuthCredential,
    ) -> Result<AuthSession, AppError> {
        self.ensure_open()?;
        let session = self
            .identity
            .sign_in_with_idp(credential, &self.oauth_request_uri)
            .await?;
        self.remember(&session).await;
        Ok(session)
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        self.ensure_open()?;
        self.identity.send_password_reset(email).await?;
        info!("Password reset email requested");
        Ok(())
    }

    /// Forgets the token and announces the sign-out.
    pub async fn sign_out(&self, id_token: &str, user: &AuthUser) {
        self.sessions.write().await.remove(id_token);
        info!("User {} signed out", user.uid);
        self.publish(AuthEvent::SignedOut {
            uid: user.uid.clone(),
        });
    }

    /// Maps a bearer token to its account, consulting the provider when the
    /// token is unknown or its cache entry has expired.
    pub async fn resolve(&self, id_token: &str) -> Result<AuthUser, AppError> {
        self.ensure_open()?;

        {
            let sessions = self.sessions.read().await;
            if let Some(cached) = sessions.get(id_token) {
                if cached.expires_at > Instant::now() {
                    return Ok(cached.user.clone());
                }
            }
        }

        let user = match self.identity.lookup(id_token).await {
            Ok(user) => user,
            Err(IdentityError::Provider(msg)) => {
                debug!("Token rejected by identity provider: {msg}");
                return Err(AppError::Unauthorized);
            }
            Err(other) => return Err(other.into()),
        };

        self.cache(id_token, user.clone(), LOOKUP_CACHE_TTL).await;
        Ok(user)
    }

    /// Ends the lifecycle: cached sessions are dropped and subscribers see the
    /// event channel close. Later calls fail with `Unauthorized`.
    pub async fn teardown(&self) {
        self.closed.store(true, Ordering::Release);
        self.sessions.write().await.clear();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        info!("Session context torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, Router};

    fn context() -> SessionContext {
        // Points at a closed port; these tests never reach the provider.
        let identity = IdentityClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9".to_string(),
            "test-key".to_string(),
        );
        SessionContext::new(identity, "http://localhost".to_string())
    }

    fn session(token: &str, uid: &str) -> AuthSession {
        AuthSession {
            id_token: token.to_string(),
            refresh_token: String::new(),
            expires_in_secs: 3600,
            user: AuthUser {
                uid: uid.to_string(),
                email: format!("{uid}@example.com"),
                display_name: None,
            },
        }
    }

    fn expiring(token: &str, uid: &str) -> AuthSession {
        AuthSession {
            expires_in_secs: 0,
            ..session(token, uid)
        }
    }

    /// Identity provider that answers every call with 503.
    async fn unavailable_provider() -> SessionContext {
        let app = Router::new().fallback(|| async {
            (StatusCode::SERVICE_UNAVAILABLE, "upstream connect error")
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let identity = IdentityClient::new(reqwest::Client::new(), base_url, "test-key".to_string());
        SessionContext::new(identity, "http://localhost".to_string())
    }

    #[tokio::test]
    async fn test_provider_outage_is_not_an_auth_failure() {
        let ctx = unavailable_provider().await;

        let err = ctx.resolve("tok-live").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }), "got {err:?}");

        let err = ctx.sign_in("a@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_expired_sessions_are_evicted() {
        let ctx = context();
        for i in 0..50 {
            ctx.remember(&expiring(&format!("old-{i}"), "u1")).await;
        }
        ctx.remember(&session("tok-new", "u1")).await;

        let sessions = ctx.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("tok-new"));
    }

    #[tokio::test]
    async fn test_remembered_session_resolves_without_provider() {
        let ctx = context();
        ctx.remember(&session("tok-1", "u1")).await;
        let user = ctx.resolve("tok-1").await.unwrap();
        assert_eq!(user.uid, "u1");
    }

    #[tokio::test]
    async fn test_events_are_published() {
        let ctx = context();
        let mut rx = ctx.subscribe();
        let s = session("tok-2", "u2");
        ctx.remember(&s).await;
        ctx.sign_out("tok-2", &s.user).await;

        assert_eq!(rx.recv().await.unwrap(), AuthEvent::SignedIn(s.user.clone()));
        assert_eq!(
            rx.recv().await.unwrap(),
            AuthEvent::SignedOut {
                uid: "u2".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_teardown_closes_channel_and_rejects_resolve() {
        let ctx = context();
        let mut rx = ctx.subscribe();
        ctx.remember(&session("tok-3", "u3")).await;
        let _ = rx.recv().await;

        ctx.teardown().await;

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
        assert!(matches!(
            ctx.resolve("tok-3").await,
            Err(AppError::Unauthorized)
        ));
    }
}
