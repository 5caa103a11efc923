//! Request handlers, one module per page group.

pub mod admin;
pub mod auth;
pub mod history;
pub mod home;
pub mod result;

/// Navigation bar shared across all pages.
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

/// Render a full page around the given body HTML.
///
/// Pages are assembled with `format!` rather than a template engine; the
/// markup is small enough that the indirection would cost more than it buys.
pub fn page(title: &str, user: Option<&str>, body: &str) -> String {
    let session_box = match user {
        Some(name) => format!(
            r#"<div class="session-box">Signed in as <strong>{}</strong>
               <form method="POST" action="/logout" class="inline-form"><button type="submit" class="btn btn-link">Log out</button></form></div>"#,
            escape_html(name)
        ),
        None => r#"<div class="session-box"><a href="/login">Log in</a> · <a href="/register">Register</a></div>"#.to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} — Sympta</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{NAV_HTML}
{session_box}
<main class="main-content">
{body}
</main>
</body>
</html>"#
    )
}

/// Minimal HTML escaping for user-supplied text interpolated into pages.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("fever & cough"), "fever &amp; cough");
    }

    #[test]
    fn page_includes_nav_and_session_state() {
        let html = page("Home", Some("alice"), "<p>hi</p>");
        assert!(html.contains("Signed in as <strong>alice</strong>"));
        let html = page("Home", None, "<p>hi</p>");
        assert!(html.contains("/login"));
    }
}
