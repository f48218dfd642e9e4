//! ListSessionsHandler - Query handler for the session listing.

use std::sync::Arc;

use crate::domain::session::SessionSummary;
use crate::ports::SessionStore;

/// Handler for listing every session in creation order.
pub struct ListSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Vec<SessionSummary> {
        self.store.list().await
    }
}
