//! Application state for the analyzer server

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::extract::DocumentParser;
use crate::llm::GeminiClient;
use crate::types::{Session, SessionView};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AnalyzerConfig,
    /// Text extraction
    parser: DocumentParser,
    /// Hosted model client
    model: GeminiClient,
    /// Live sessions keyed by id; memory only, nothing is persisted
    sessions: DashMap<Uuid, Session>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let parser = DocumentParser::new(&config.extraction);
        let model = GeminiClient::new(&config.model)?;
        tracing::info!("Model client initialized ({})", config.model.model);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                parser,
                model,
                sessions: DashMap::new(),
                ready: RwLock::new(false),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.inner.config
    }

    /// Get the document parser
    pub fn parser(&self) -> &DocumentParser {
        &self.inner.parser
    }

    /// Get the hosted model client
    pub fn model(&self) -> &GeminiClient {
        &self.inner.model
    }

    /// Characters of document text shown in previews
    pub fn preview_chars(&self) -> usize {
        self.inner.config.extraction.preview_chars
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }

    /// Create a new session and return its id
    pub fn create_session(&self) -> Uuid {
        let session = Session::new();
        let id = session.id;
        self.inner.sessions.insert(id, session);
        id
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.inner.sessions.len()
    }

    /// Render a snapshot of a session for API responses
    pub fn session_view(&self, id: &Uuid) -> Result<SessionView> {
        let session = self
            .inner
            .sessions
            .get(id)
            .ok_or(Error::SessionNotFound(*id))?;
        Ok(SessionView::from_session(&session, self.preview_chars()))
    }

    /// Remove a session and everything it holds
    pub fn remove_session(&self, id: &Uuid) -> Result<()> {
        self.inner
            .sessions
            .remove(id)
            .map(|_| ())
            .ok_or(Error::SessionNotFound(*id))
    }

    /// Run `f` against a session without mutating it
    ///
    /// The map guard is confined to `f`; callers must snapshot what they
    /// need out instead of holding borrows across an await.
    pub fn with_session<T>(&self, id: &Uuid, f: impl FnOnce(&Session) -> Result<T>) -> Result<T> {
        let session = self
            .inner
            .sessions
            .get(id)
            .ok_or(Error::SessionNotFound(*id))?;
        f(&session)
    }

    /// Run `f` against a mutable session, bumping its activity timestamp
    pub fn with_session_mut<T>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Session) -> Result<T>,
    ) -> Result<T> {
        let mut session = self
            .inner
            .sessions
            .get_mut(id)
            .ok_or(Error::SessionNotFound(*id))?;
        session.touch();
        f(&mut session)
    }

    /// Remove sessions idle for longer than `ttl`; returns how many went
    pub fn evict_idle(&self, ttl: chrono::Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let before = self.inner.sessions.len();
        self.inner.sessions.retain(|_, session| session.last_active >= cutoff);
        before - self.inner.sessions.len()
    }

    /// Start the background task that evicts idle sessions
    pub fn spawn_idle_sweeper(&self) {
        let state = self.clone();
        let ttl = chrono::Duration::seconds(self.inner.config.session.idle_ttl_secs as i64);
        let every = std::time::Duration::from_secs(self.inner.config.session.sweep_interval_secs);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = state.evict_idle(ttl);
                if evicted > 0 {
                    tracing::info!("Evicted {} idle session(s)", evicted);
                }
            }
        });
    }
}
