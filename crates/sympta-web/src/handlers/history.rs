//! Report history and PDF download.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use sympta_common::ApiError;
use sympta_db::reports::{get_report_by_id, list_reports_for_user};
use sympta_db::Report;

use crate::handlers::{auth::current_user, escape_html, page};
use crate::state::SharedState;

/// GET /history — the signed-in user's reports, newest first.
pub async fn history_page(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Html<String>, ApiError> {
    let Some(user) = current_user(&state, &jar).await? else {
        return Err(ApiError::Unauthorized);
    };

    let reports = {
        let conn = state.db.lock().await;
        list_reports_for_user(&conn, &user.id).map_err(ApiError::internal)?
    };

    Ok(Html(page(
        "My reports",
        Some(&user.username),
        &render_history(&reports),
    )))
}

/// GET /reports/{id}/pdf — download one report as PDF.
///
/// 404 for unknown ids, 403 when the report belongs to another user.
pub async fn report_pdf(
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user) = current_user(&state, &jar).await? else {
        return Err(ApiError::Unauthorized);
    };

    let report = {
        let conn = state.db.lock().await;
        get_report_by_id(&conn, &id).map_err(ApiError::internal)?
    }
    .ok_or_else(|| ApiError::not_found(format!("report {id}")))?;

    if report.user_id != user.id {
        return Err(ApiError::Forbidden);
    }

    let bytes =
        sympta_pdf::generate_report_pdf(&report, &user.username).map_err(ApiError::internal)?;
    let filename = format!("sympta-report-{}.pdf", report.id);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

fn render_history(reports: &[Report]) -> String {
    if reports.is_empty() {
        return r#"<div class="page-header"><h1 class="page-title">My reports</h1></div>
<div class="card"><p class="text-muted">No reports yet. Run a symptom check while signed in and the best match lands here.</p></div>"#
            .to_string();
    }

    let rows: String = reports
        .iter()
        .map(|r| {
            format!(
                r#"<tr>
    <td>{date}</td>
    <td class="disease-name">{disease}</td>
    <td><strong>{percent}%</strong></td>
    <td>{typed}</td>
    <td><a href="/reports/{id}/pdf" class="btn btn-outline btn-sm">PDF</a></td>
</tr>"#,
                date = r.created_at.format("%Y-%m-%d %H:%M"),
                disease = escape_html(&r.disease),
                percent = r.match_percent,
                typed = escape_html(&r.typed_text),
                id = r.id,
            )
        })
        .collect();

    format!(
        r#"<div class="page-header"><h1 class="page-title">My reports</h1></div>
<div class="card table-container">
    <table class="table">
        <thead><tr><th>Date</th><th>Disease</th><th>Match</th><th>You typed</th><th></th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
</div>"#
    )
}
