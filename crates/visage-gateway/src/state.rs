//! Shared application state.
//!
//! The hosted-service clients are injected here rather than living in
//! a process-wide singleton, so tests can substitute the in-memory
//! repository and object store.

use std::sync::Arc;

use crate::actions::ProfileActions;
use crate::auth::SessionConfig;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub actions: Arc<ProfileActions>,
    pub sessions: Arc<SessionConfig>,
}

impl AppState {
    pub fn new(actions: ProfileActions, sessions: SessionConfig) -> Self {
        Self {
            actions: Arc::new(actions),
            sessions: Arc::new(sessions),
        }
    }
}
