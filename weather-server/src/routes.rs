//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router.
///
/// `/weather` takes GET and POST in both modes; `post_weather` rejects POST
/// in proxy mode. Any other method gets a 405 from the method router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/weather",
            get(handlers::get_weather).post(handlers::post_weather),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
