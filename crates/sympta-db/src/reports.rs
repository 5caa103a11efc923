//! Report repository.
//!
//! A report records one query's best match for a signed-in user. Reports
//! are written once on submission and only read back afterwards, for the
//! history page and the PDF download.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DatabaseError;

/// Input shape for saving a report; the id and timestamp are assigned here.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: Uuid,
    pub typed_text: String,
    pub disease: String,
    pub precaution: String,
    pub medicine: String,
    pub match_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub typed_text: String,
    pub disease: String,
    pub precaution: String,
    pub medicine: String,
    pub match_percent: f64,
    pub created_at: DateTime<Utc>,
}

/// Persist a report. Callers only do this when the query produced at least
/// one match; an empty result never becomes a report.
pub fn save_report(conn: &Connection, new: &NewReport) -> Result<Report, DatabaseError> {
    // Microsecond precision, matching what the column stores, so a report
    // read back compares equal to the one returned here.
    let now = Utc::now();
    let created_at = now
        .with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now);
    let report = Report {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        typed_text: new.typed_text.clone(),
        disease: new.disease.clone(),
        precaution: new.precaution.clone(),
        medicine: new.medicine.clone(),
        match_percent: new.match_percent,
        created_at,
    };
    conn.execute(
        "INSERT INTO reports (id, user_id, typed_text, disease, precaution, medicine, match_percent, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            report.id.to_string(),
            report.user_id.to_string(),
            report.typed_text,
            report.disease,
            report.precaution,
            report.medicine,
            report.match_percent,
            // Fixed-width fraction so the lexicographic ORDER BY on
            // created_at always equals chronological order; plain
            // to_rfc3339() drops the fraction at whole seconds.
            report.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )?;
    Ok(report)
}

/// All reports for one user, newest first.
pub fn list_reports_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<Report>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, typed_text, disease, precaution, medicine, match_percent, created_at
         FROM reports WHERE user_id = ?1 ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map(params![user_id.to_string()], report_row)?;
    rows.collect::<Result<Vec<ReportRow>, _>>()?
        .into_iter()
        .map(report_from_row)
        .collect()
}

pub fn get_report_by_id(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<Report>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, user_id, typed_text, disease, precaution, medicine, match_percent, created_at
         FROM reports WHERE id = ?1",
        params![id.to_string()],
        report_row,
    );
    match result {
        Ok(row) => Ok(Some(report_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Internal row type for Report mapping
struct ReportRow {
    id: String,
    user_id: String,
    typed_text: String,
    disease: String,
    precaution: String,
    medicine: String,
    match_percent: f64,
    created_at: String,
}

fn report_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReportRow> {
    Ok(ReportRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        typed_text: row.get(2)?,
        disease: row.get(3)?,
        precaution: row.get(4)?,
        medicine: row.get(5)?,
        match_percent: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn report_from_row(row: ReportRow) -> Result<Report, DatabaseError> {
    Ok(Report {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        user_id: Uuid::parse_str(&row.user_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        typed_text: row.typed_text,
        disease: row.disease,
        precaution: row.precaution,
        medicine: row.medicine,
        match_percent: row.match_percent,
        created_at: DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::open_memory_database;
    use crate::users::create_user;
    use chrono::TimeZone;

    fn new_report(user_id: Uuid, disease: &str) -> NewReport {
        NewReport {
            user_id,
            typed_text: "fever, cough".into(),
            disease: disease.into(),
            precaution: "rest".into(),
            medicine: "paracetamol".into(),
            match_percent: 100.0,
        }
    }

    #[test]
    fn save_and_get_report() {
        let conn = open_memory_database().unwrap();
        let user = create_user(&conn, "alice", "secret").unwrap();

        let saved = save_report(&conn, &new_report(user.id, "Flu")).unwrap();
        let fetched = get_report_by_id(&conn, &saved.id).unwrap().unwrap();
        assert_eq!(fetched, saved);
        assert!(get_report_by_id(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_is_scoped_to_user_and_newest_first() {
        let conn = open_memory_database().unwrap();
        let alice = create_user(&conn, "alice", "secret").unwrap();
        let bob = create_user(&conn, "bob", "secret").unwrap();

        save_report(&conn, &new_report(alice.id, "Flu")).unwrap();
        save_report(&conn, &new_report(alice.id, "Malaria")).unwrap();
        save_report(&conn, &new_report(bob.id, "Cold")).unwrap();

        let reports = list_reports_for_user(&conn, &alice.id).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert!(reports.iter().all(|r| r.user_id == alice.id));
    }

    #[test]
    fn unknown_user_has_no_reports() {
        let conn = open_memory_database().unwrap();
        assert!(list_reports_for_user(&conn, &Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn stored_timestamps_have_fixed_width_fractions() {
        let conn = open_memory_database().unwrap();
        let user = create_user(&conn, "alice", "secret").unwrap();
        let saved = save_report(&conn, &new_report(user.id, "Flu")).unwrap();

        let stored: String = conn
            .query_row(
                "SELECT created_at FROM reports WHERE id = ?1",
                params![saved.id.to_string()],
                |row| row.get(0),
            )
            .unwrap();

        // Six fractional digits even at whole seconds, so the string
        // ORDER BY in list_reports_for_user compares chronologically.
        let fraction = stored.split('.').nth(1).unwrap();
        assert_eq!(fraction, format!("{:06}Z", saved.created_at.nanosecond() / 1_000));
    }

    #[test]
    fn whole_second_timestamps_sort_before_fractional_ones() {
        let base = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let later = base + chrono::Duration::microseconds(1);
        let a = base.to_rfc3339_opts(SecondsFormat::Micros, true);
        let b = later.to_rfc3339_opts(SecondsFormat::Micros, true);
        assert!(a < b);
        assert!(a.contains(".000000"));
    }
}
