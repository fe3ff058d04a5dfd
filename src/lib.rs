pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;

use services::providers::TextProvider;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
    /// Deadline applied to generation calls made from the chat page.
    pub generation_timeout: Duration,
}

impl AppState {
    pub fn new(text_provider: Arc<dyn TextProvider>, generation_timeout: Duration) -> Self {
        Self {
            text_provider,
            generation_timeout,
        }
    }
}
