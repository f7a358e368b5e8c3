use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod health;
pub mod state;
pub mod suggestions;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(suggestions::routes())
        .merge(health::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
