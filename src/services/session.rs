//! Typed session access for the cookie-consent flag.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::StatusCode};
use tower_sessions::Session;

const CONSENT_KEY: &str = "cookie_accepted";

/// Wrapper around the session exposing the consent flag as a typed boolean.
///
/// Extracted directly in handlers, so nothing else touches raw session keys.
pub struct ConsentSession {
    session: Session,
}

impl ConsentSession {
    /// Whether the client accepted cookies. No decision and an explicit
    /// denial both read as `false`, which keeps the banner visible.
    pub async fn accepted(&self) -> bool {
        self.session
            .get::<bool>(CONSENT_KEY)
            .await
            .unwrap_or(None)
            .unwrap_or(false)
    }

    pub async fn record_choice(
        &self,
        accepted: bool,
    ) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(CONSENT_KEY, accepted).await
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ConsentSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self { session })
    }
}
