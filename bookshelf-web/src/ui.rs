//! Server-rendered HTML pages
//!
//! Deliberately minimal: a shared layout plus one render function per page,
//! no template engine. All user-supplied values pass through `escape`.

use axum::http::StatusCode;
use axum::response::Html;
use bookshelf_common::db::models::{Book, ReadingStatus, User};

use crate::services::catalog::BookDetail;

/// HTML-escape a user-supplied value
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

/// Shared page chrome: header, nav, body
fn layout(title: &str, user: Option<&User>, body: &str) -> Html<String> {
    let nav = match user {
        Some(user) => format!(
            r#"<span>Hello, {}</span>
            <a href="/book">Search</a>
            <a href="/reading">In Progress</a>
            <a href="/complete">Completed</a>
            <a href="/future">Read later</a>
            <a href="/logout">Log out</a>"#,
            escape(&user.first_name)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} - Bookshelf</title>
</head>
<body>
  <header>
    <h1><a href="/">Bookshelf</a></h1>
    <nav>{nav}</nav>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

/// Optional one-line notice above a form (flash or validation message)
fn notice(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(r#"<p class="notice">{}</p>"#, escape(msg)),
        None => String::new(),
    }
}

pub fn home_page(user: Option<&User>) -> Html<String> {
    let body = match user {
        Some(_) => {
            r#"<p>Search the catalog and file books into your reading buckets.</p>
<p><a href="/book">Find a book</a></p>"#
        }
        None => {
            r#"<p>Track what you are reading, what you finished, and what comes next.</p>
<p><a href="/register">Register</a> or <a href="/login">log in</a> to get started.</p>"#
        }
    };
    layout("Home", user, body)
}

pub fn login_page(message: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{notice}<h2>Log in</h2>
<form method="post" action="/login">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>"#,
        notice = notice(message),
    );
    layout("Log in", None, &body)
}

pub fn register_page(message: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{notice}<h2>Register</h2>
<form method="post" action="/register">
  <label>First Name <input type="text" name="first_name" required></label>
  <label>Last Name <input type="text" name="last_name" required></label>
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <label>Re-enter Password <input type="password" name="repeat_password" required></label>
  <button type="submit">Register</button>
</form>"#,
        notice = notice(message),
    );
    layout("Register", None, &body)
}

pub fn search_page(user: Option<&User>, message: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{notice}<h2>Find a book</h2>
<form method="post" action="/book">
  <label>Title <input type="text" name="book_needed" required></label>
  <button type="submit">Search</button>
</form>"#,
        notice = notice(message),
    );
    layout("Search", user, &body)
}

pub fn search_results_page(user: Option<&User>, query: &str, results: &[BookDetail]) -> Html<String> {
    let mut body = format!("<h2>Results for \"{}\"</h2>\n<ul>\n", escape(query));
    for detail in results {
        let cover = match &detail.cover_url {
            Some(url) => format!(r#"<img src="{}" alt="">"#, escape(url)),
            None => String::new(),
        };
        let published = detail.published_date.as_deref().unwrap_or("");
        body.push_str(&format!(
            r#"  <li>
    {cover}
    <strong>{title}</strong> by {authors} {published}
    <a href="/add_read/{id}">In Progress</a>
    <a href="/add_complete/{id}">Completed</a>
    <a href="/add_future/{id}">Read later</a>
  </li>
"#,
            title = escape(&detail.title),
            authors = escape(&detail.authors),
            published = escape(published),
            id = escape(&detail.external_id),
        ));
    }
    body.push_str("</ul>\n");
    layout("Search results", user, &body)
}

pub fn bucket_page(user: &User, status: ReadingStatus, books: &[Book]) -> Html<String> {
    let mut body = format!("<h2>{}</h2>\n", status.label());
    if books.is_empty() {
        body.push_str("<p>No books here yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for book in books {
            let cover = match &book.cover_url {
                Some(url) => format!(r#"<img src="{}" alt="">"#, escape(url)),
                None => String::new(),
            };
            let published = book.published_date.as_deref().unwrap_or("");
            body.push_str(&format!(
                "  <li>{cover} <strong>{title}</strong> by {authors} {published}</li>\n",
                title = escape(&book.title),
                authors = escape(&book.authors),
                published = escape(published),
            ));
        }
        body.push_str("</ul>\n");
    }
    layout(status.label(), Some(user), &body)
}

/// Generic error page for catalog failures and unhandled faults
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        r#"<h2>Something went wrong</h2>
<p>{status}</p>
<p>{message}</p>
<p><a href="/">Back to home</a></p>"#,
        status = status.as_u16(),
        message = escape(message),
    );
    layout("Error", None, &body)
}
