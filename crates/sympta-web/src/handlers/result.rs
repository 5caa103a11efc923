//! Query submission: run the matcher, render ranked results, persist the
//! best match as a report for signed-in users.

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use sympta_common::ApiError;
use sympta_core::MatchResult;
use sympta_db::reports::{save_report, NewReport};

use crate::handlers::{auth::current_user, escape_html, page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SymptomForm {
    #[serde(default)]
    pub symptoms: String,
}

pub async fn submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<SymptomForm>,
) -> Result<Html<String>, ApiError> {
    let user = current_user(&state, &jar).await?;
    let typed = form.symptoms.trim().to_string();

    let kb = state.snapshot();
    let results = sympta_core::query(&kb, &typed);

    // Persist only the top-ranked match, and only for signed-in users with
    // a non-empty result.
    let mut saved_note = String::new();
    if let (Some(user), Some((disease, top))) = (&user, results.first()) {
        let report = {
            let conn = state.db.lock().await;
            save_report(
                &conn,
                &NewReport {
                    user_id: user.id,
                    typed_text: typed.clone(),
                    disease: disease.clone(),
                    precaution: top.precaution.clone(),
                    medicine: top.medicine.clone(),
                    match_percent: top.match_percent,
                },
            )
            .map_err(ApiError::internal)?
        };
        tracing::info!(user = %user.username, disease = %report.disease, "report saved");
        saved_note = format!(
            r#"<p class="text-muted small">Saved to your history — <a href="/reports/{}/pdf">download PDF</a> or see <a href="/history">all reports</a>.</p>"#,
            report.id
        );
    }

    let body = render_results(&typed, &results, &saved_note);
    Ok(Html(page("Results", user.as_ref().map(|u| u.username.as_str()), &body)))
}

fn render_results(typed: &str, results: &[(String, MatchResult)], saved_note: &str) -> String {
    if results.is_empty() {
        return format!(
            r#"<div class="page-header"><h1 class="page-title">No match</h1></div>
<div class="card">
    <p>Nothing in the disease table matched <em>{}</em>.</p>
    <p class="text-muted">Check the spelling, or pick suggestions from the autocomplete list.</p>
    <a href="/" class="btn btn-primary">Try again</a>
</div>"#,
            escape_html(typed)
        );
    }

    let rows: String = results
        .iter()
        .enumerate()
        .map(|(i, (disease, r))| {
            format!(
                r#"<tr>
    <td><span class="rank-badge">#{rank}</span></td>
    <td class="disease-name">{disease}</td>
    <td><strong>{percent}%</strong></td>
    <td>{matched} <span class="text-muted">(of {total} known)</span></td>
    <td>{precaution}</td>
    <td>{medicine}</td>
</tr>"#,
                rank = i + 1,
                disease = escape_html(disease),
                percent = r.match_percent,
                matched = escape_html(&r.matched_symptoms.join(", ")),
                total = r.total_symptoms,
                precaution = escape_html(&r.precaution),
                medicine = escape_html(&r.medicine),
            )
        })
        .collect();

    format!(
        r#"<div class="page-header">
    <h1 class="page-title">Results for: <em>{typed}</em></h1>
    <p class="text-muted">Match % is relative to what you typed, not to each disease's full symptom list.</p>
</div>
{saved_note}
<div class="card table-container">
    <table class="table">
        <thead><tr>
            <th>#</th><th>Disease</th><th>Match</th>
            <th>Matched symptoms</th><th>Precaution</th><th>Medicine</th>
        </tr></thead>
        <tbody>{rows}</tbody>
    </table>
</div>
<a href="/" class="btn btn-outline">New search</a>"#,
        typed = escape_html(typed),
        saved_note = saved_note,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(percent: f64) -> MatchResult {
        MatchResult {
            matched_symptoms: vec!["fever".into()],
            total_symptoms: 2,
            match_percent: percent,
            precaution: "rest".into(),
            medicine: "paracetamol".into(),
        }
    }

    #[test]
    fn empty_results_render_no_match_not_error() {
        let html = render_results("unicorn pox", &[], "");
        assert!(html.contains("No match"));
        assert!(html.contains("unicorn pox"));
    }

    #[test]
    fn results_table_lists_ranked_diseases() {
        let html = render_results(
            "fever",
            &[("Flu".into(), result(100.0)), ("Malaria".into(), result(50.0))],
            "",
        );
        assert!(html.contains("Flu"));
        assert!(html.contains("Malaria"));
        assert!(html.find("Flu").unwrap() < html.find("Malaria").unwrap());
    }

    #[test]
    fn typed_text_is_escaped() {
        let html = render_results("<script>", &[], "");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
