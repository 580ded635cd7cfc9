//! Shared application state for all routes.

use crate::config::ResolvedModel;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected store capability; PostgreSQL in production, in-memory in tests.
    pub store: Arc<dyn RecordStore>,
    pub model: Arc<ResolvedModel>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, model: ResolvedModel) -> Self {
        AppState {
            store,
            model: Arc::new(model),
        }
    }
}
