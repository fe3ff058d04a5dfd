use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::AppState;

#[derive(Serialize)]
pub struct WorkoutResponse {
    pub workout_plan: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn generate_workout(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Response {
    let user_input = match payload.get("user_input") {
        None | Some(Value::Null) => {
            return bad_request("No input provided. Please provide your fitness preferences!")
        }
        Some(Value::String(s)) if s.is_empty() => {
            return bad_request("No input provided. Please provide your fitness preferences!")
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            return bad_request(
                "Invalid input type. Please provide a valid string for your fitness preferences!",
            )
        }
    };

    let trimmed = user_input.trim();
    if trimmed.is_empty() {
        return bad_request("Input is empty. Please provide a meaningful fitness preference!");
    }

    let prompt = format!("Create a personalized workout plan based on: {}", trimmed);

    match state.text_provider.generate(&prompt).await {
        Ok(workout_plan) => {
            (StatusCode::OK, Json(WorkoutResponse { workout_plan })).into_response()
        }
        Err(e) => {
            tracing::error!("Workout generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error generating workout: {}", e),
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
