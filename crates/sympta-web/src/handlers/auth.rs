//! Registration, login and logout.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use sympta_common::ApiError;
use sympta_db::sessions::{create_session, delete_session, find_user_by_token};
use sympta_db::users::{authenticate, create_user};
use sympta_db::{DatabaseError, User};

use crate::handlers::{escape_html, page};
use crate::state::{AppState, SharedState};

pub const SESSION_COOKIE: &str = "sympta_session";

/// Resolve the request's session cookie to a user, if any.
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Result<Option<User>, ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let conn = state.db.lock().await;
    find_user_by_token(&conn, cookie.value()).map_err(ApiError::internal)
}

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register_page() -> Html<String> {
    Html(render_auth_page("Register", "/register", None))
}

pub async fn register_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, ApiError> {
    let username = form.username.trim().to_string();
    if username.is_empty() || form.password.len() < 6 {
        let msg = "Username must be non-empty and password at least 6 characters.";
        return Ok(Html(render_auth_page("Register", "/register", Some(msg))).into_response());
    }

    let session = {
        let conn = state.db.lock().await;
        match create_user(&conn, &username, &form.password) {
            Ok(user) => create_session(&conn, &user.id).map_err(ApiError::internal)?,
            Err(DatabaseError::UsernameTaken(_)) => {
                let msg = "That username is already taken.";
                return Ok(
                    Html(render_auth_page("Register", "/register", Some(msg))).into_response()
                );
            }
            Err(e) => return Err(ApiError::internal(e)),
        }
    };
    tracing::info!(user = %username, "account created");

    Ok((jar.add(session_cookie(session)), Redirect::to("/")).into_response())
}

pub async fn login_page() -> Html<String> {
    Html(render_auth_page("Log in", "/login", None))
}

pub async fn login_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, ApiError> {
    let session = {
        let conn = state.db.lock().await;
        match authenticate(&conn, form.username.trim(), &form.password)
            .map_err(ApiError::internal)?
        {
            Some(user) => create_session(&conn, &user.id).map_err(ApiError::internal)?,
            None => {
                let msg = "Unknown username or wrong password.";
                return Ok(Html(render_auth_page("Log in", "/login", Some(msg))).into_response());
            }
        }
    };

    Ok((jar.add(session_cookie(session)), Redirect::to("/")).into_response())
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let conn = state.db.lock().await;
        delete_session(&conn, cookie.value()).map_err(ApiError::internal)?;
    }
    let removal = Cookie::build(SESSION_COOKIE).path("/").build();
    Ok((jar.remove(removal), Redirect::to("/")))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

fn render_auth_page(title: &str, action: &str, error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!(r#"<div class="alert alert-warning">{}</div>"#, escape_html(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<div class="page-header"><h1 class="page-title">{title}</h1></div>
{error_html}
<div class="card narrow">
    <form method="POST" action="{action}">
        <label class="form-label" for="username">Username</label>
        <input type="text" id="username" name="username" class="form-control" required>
        <label class="form-label" for="password">Password</label>
        <input type="password" id="password" name="password" class="form-control" required>
        <button type="submit" class="btn btn-primary">{title}</button>
    </form>
</div>"#
    );
    page(title, None, &body)
}
