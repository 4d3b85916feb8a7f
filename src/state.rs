use std::sync::Arc;

use crate::store::MockStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MockStore>,
}

impl AppState {
    pub fn new(store: MockStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
