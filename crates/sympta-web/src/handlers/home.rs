//! Landing page: symptom entry form with autocomplete.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use axum_extra::extract::CookieJar;

use sympta_common::ApiError;

use crate::handlers::{auth::current_user, escape_html, page};
use crate::state::SharedState;

pub async fn index(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Html<String>, ApiError> {
    let user = current_user(&state, &jar).await?;
    let symptoms = state.symptom_index();

    let options: String = symptoms
        .iter()
        .map(|s| format!("<option value=\"{}\">", escape_html(s)))
        .collect();

    let body = format!(
        r#"<div class="page-header">
    <h1 class="page-title">Symptom checker</h1>
    <p class="text-muted">Type comma-separated symptoms; the table below is matched by substring, so partial words work.</p>
</div>
<div class="card">
    <form method="POST" action="/result">
        <label class="form-label" for="symptoms">Your symptoms</label>
        <input type="text" id="symptoms" name="symptoms" class="form-control"
               list="known-symptoms" placeholder="e.g. fever, cough, chills" autofocus>
        <datalist id="known-symptoms">{options}</datalist>
        <button type="submit" class="btn btn-primary">Find matching diseases</button>
    </form>
    <p class="text-muted small">{count} known symptoms across the loaded dataset.</p>
</div>"#,
        options = options,
        count = symptoms.len(),
    );

    Ok(Html(page("Symptom checker", user.as_ref().map(|u| u.username.as_str()), &body)))
}

/// GET /api/symptoms — the autocomplete index as JSON.
pub async fn api_symptoms(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.symptom_index().as_ref().clone())
}
