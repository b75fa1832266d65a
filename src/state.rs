use std::sync::Arc;

use crate::session::SessionStore;
use crate::store::Storage;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            sessions: SessionStore::new(),
        }
    }
}
