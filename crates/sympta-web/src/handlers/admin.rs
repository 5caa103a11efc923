//! Knowledge-base reload endpoint.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use sympta_common::ApiError;

use crate::handlers::auth::current_user;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub diseases: usize,
    pub symptoms: usize,
}

/// POST /admin/reload — rebuild the knowledge base from the dataset file
/// and swap the shared snapshot. On failure the previous snapshot stays
/// live and the error is reported.
///
/// Requires a signed-in session; anonymous callers must not be able to
/// trigger dataset reloads.
pub async fn reload(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<ReloadResponse>, ApiError> {
    if current_user(&state, &jar).await?.is_none() {
        return Err(ApiError::Unauthorized);
    }

    let diseases = state.reload().map_err(ApiError::internal)?;
    let symptoms = state.symptom_index().len();
    tracing::info!(diseases, symptoms, "knowledge base reloaded");
    Ok(Json(ReloadResponse { diseases, symptoms }))
}
