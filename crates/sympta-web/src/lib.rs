//! sympta-web — web front end for the Sympta symptom checker.
//! Provides:
//!   - Symptom entry with autocomplete
//!   - Ranked disease results per query
//!   - Account registration and login
//!   - Per-user report history with PDF download
//!   - Knowledge-base reload endpoint

pub mod handlers;
pub mod router;
pub mod state;
