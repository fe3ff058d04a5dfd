//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::time::Duration;

enum Behavior {
    Reply(String),
    Fail(String),
}

/// Mock text provider that returns a canned reply or a canned failure.
pub struct MockTextProvider {
    behavior: Behavior,
    delay: Option<Duration>,
}

impl MockTextProvider {
    pub fn with_reply(text: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Reply(text.into()),
            delay: None,
        }
    }

    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(detail.into()),
            delay: None,
        }
    }

    /// Delay each call, to exercise the generation deadline.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail(detail) => Err(ProviderError::ApiError(detail.clone())),
        }
    }
}
