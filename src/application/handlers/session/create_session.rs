//! CreateSessionHandler - Command handler for creating new polls.

use std::sync::Arc;

use crate::domain::session::{Session, SessionError};
use crate::ports::SessionStore;

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<CreateSessionResult, SessionError> {
        let session = match self
            .store
            .create(&cmd.title, cmd.description.as_deref(), &cmd.options)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected session creation");
                return Err(e);
            }
        };

        tracing::info!(
            session_id = %session.id(),
            options = session.options().len(),
            "Session created"
        );

        Ok(CreateSessionResult { session })
    }
}
