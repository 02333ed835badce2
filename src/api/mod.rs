pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{profile::ProfileService, search::SearchEngine, store::Store};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub profiles: Arc<ProfileService>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            engine: Arc::new(SearchEngine::new(store.clone())),
            profiles: Arc::new(ProfileService::new(store)),
        }
    }
}
