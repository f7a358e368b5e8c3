use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use adventure_core::SuggestionParams;
use serde_json::Value;
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/suggestions", post(get_suggestions))
}

/// POST /api/suggestions
/// Ask the model for activity ideas matching location, time of day and budget
async fn get_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionParams>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    // An unreadable body carries no parameters, so it fails validation below
    let params = match payload {
        Ok(Json(params)) => params,
        Err(rejection) => {
            tracing::debug!("Unreadable suggestion request body: {}", rejection.body_text());
            SuggestionParams::default()
        }
    };

    let suggestions = state.suggestions.suggest(params).await?;

    Ok(Json(suggestions))
}
