use studyhall_core::{Normalizer, Store};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub store: Store,
    pub normalizer: Normalizer,
}

impl AppState {
    pub fn new(store: Store, normalizer: Normalizer) -> Self {
        Self { store, normalizer }
    }
}
