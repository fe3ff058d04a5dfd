use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Form,
};
use serde::Deserialize;
use tokio::time::timeout;

use crate::services::session::ConsentSession;
use crate::AppState;

const TIMEOUT_MESSAGE: &str = "Response took too long. Please try again.";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cookie_accepted: bool,
    pub response: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Deserialize)]
pub struct ConsentForm {
    #[serde(default)]
    pub choice: String,
}

pub async fn chat_page(consent: ConsentSession) -> impl IntoResponse {
    IndexTemplate {
        cookie_accepted: consent.accepted().await,
        response: None,
    }
}

pub async fn submit_chat(
    State(state): State<AppState>,
    consent: ConsentSession,
    Form(form): Form<ChatForm>,
) -> impl IntoResponse {
    // An empty submission renders the page without a reply section.
    let response = if form.user_input.is_empty() {
        None
    } else {
        Some(generate_reply(&state, &form.user_input).await)
    };

    IndexTemplate {
        cookie_accepted: consent.accepted().await,
        response,
    }
}

/// Run the generation call under the page deadline. Failures are rendered
/// inline rather than failing the page.
async fn generate_reply(state: &AppState, user_input: &str) -> String {
    match timeout(
        state.generation_timeout,
        state.text_provider.generate(user_input),
    )
    .await
    {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::error!("Generation failed for chat page: {}", e);
            format!("Error: {}", e)
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = state.generation_timeout.as_secs(),
                "Generation deadline elapsed for chat page"
            );
            TIMEOUT_MESSAGE.to_string()
        }
    }
}

pub async fn accept_cookies(
    consent: ConsentSession,
    Form(form): Form<ConsentForm>,
) -> impl IntoResponse {
    let accepted = form.choice == "accept";

    if let Err(e) = consent.record_choice(accepted).await {
        tracing::error!("Failed to store consent choice in session: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "session error").into_response();
    }

    tracing::info!(accepted, "Recorded cookie consent choice");

    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
