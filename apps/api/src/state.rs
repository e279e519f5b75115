use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::chat::transcript::ChatTranscripts;
use crate::chat::ChatAssistant;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profile::store::ProfileStore;
use crate::registry::store::ApplicationStore;
use crate::services::bookmarks::BookmarkClient;
use crate::services::learning::ResourceClient;
use crate::services::build_http_client;
use crate::services::resume::ResumeClient;
use crate::session::identity::IdentityClient;
use crate::session::SessionContext;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sign-in state; the only owner of cached sessions.
    pub session: Arc<SessionContext>,
    /// PostgreSQL-backed when `DATABASE_URL` is set, in-memory otherwise.
    pub applications: Arc<dyn ApplicationStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub resume: ResumeClient,
    pub bookmarks: BookmarkClient,
    pub resources: ResourceClient,
    pub chat: ChatAssistant,
}

impl AppState {
    /// Builds every upstream client from `config` and wires the session
    /// context to the chat transcripts. Must run inside the tokio runtime.
    pub fn new(
        config: Config,
        applications: Arc<dyn ApplicationStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Result<Self> {
        let http = build_http_client(config.upstream_timeout_secs)?;

        let identity = IdentityClient::new(
            http.clone(),
            config.identity_base_url.clone(),
            config.identity_api_key.clone(),
        );
        let session = Arc::new(SessionContext::new(
            identity,
            config.oauth_request_uri.clone(),
        ));

        let transcripts = Arc::new(ChatTranscripts::default());
        transcripts.clone().spawn_sign_out_listener(session.subscribe());

        let llm = LlmClient::new(
            http.clone(),
            config.chat_api_url.clone(),
            config.chat_api_key.clone(),
            config.chat_model.clone(),
        );
        info!("Chat completion client initialized (model: {})", llm.model());
        let chat = ChatAssistant::new(llm, config.speech, transcripts);

        Ok(AppState {
            resume: ResumeClient::new(http.clone(), config.resume_service_url.clone()),
            bookmarks: BookmarkClient::new(http.clone(), config.bookmark_service_url.clone()),
            resources: ResourceClient::new(http, config.resource_service_url.clone()),
            config,
            session,
            applications,
            profiles,
            chat,
        })
    }
}
