pub mod api;
pub mod explore;
pub mod system;

use actix_web::{http::StatusCode, web, HttpResponse};
use wordmap_common::{Result, WordmapError};
use wordmap_vector::Exploration;

use crate::state::AppState;
use crate::types::ErrorResponse;

/// Run the CPU-bound lookup on the blocking pool
pub(crate) async fn explore_blocking(
    state: &AppState,
    word: String,
    top_n: usize,
) -> Result<Exploration> {
    let store = state.store.clone();
    web::block(move || wordmap_vector::explore(&store, &word, top_n))
        .await
        .map_err(|e| WordmapError::internal(format!("blocking task failed: {}", e)))?
}

/// JSON error body with the status matching the error
pub(crate) fn error_response(err: &WordmapError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        error: err.user_message(),
    })
}
