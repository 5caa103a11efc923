//! Axum router — maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    admin::reload,
    auth::{login_page, login_submit, logout, register_page, register_submit},
    history::{history_page, report_pdf},
    home::{api_symptoms, index},
    result::submit,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/", get(index))
        .route("/result", post(submit))
        .route("/register", get(register_page).post(register_submit))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout))
        .route("/history", get(history_page))
        .route("/reports/{id}/pdf", get(report_pdf))

        // API endpoints
        .route("/api/symptoms", get(api_symptoms))
        .route("/admin/reload", post(reload))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
