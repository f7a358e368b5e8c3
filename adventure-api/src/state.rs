use std::sync::Arc;
use adventure_core::SuggestionService;

/// Built once at startup, read-only afterwards
#[derive(Clone)]
pub struct AppState {
    pub suggestions: Arc<SuggestionService>,
}

impl AppState {
    pub fn new(suggestions: SuggestionService) -> Self {
        Self { suggestions: Arc::new(suggestions) }
    }
}
