//! HTML rendering for `Page` values.
//!
//! Every page shares one layout: a sidebar with the search box and
//! navigation links, and a main column with the page body.

use std::fmt::Write;

use super::controller::Page;
use crate::forms::{self, FieldError};
use crate::wiki::markdown::escape_html;

const SITE_NAME: &str = "Wiki";

pub fn render(page: &Page) -> String {
    match page {
        Page::Index { entries } => layout("Encyclopedia", &entry_list("All Pages", entries)),
        Page::Entry { title, html } => {
            let body = format!(
                "{}\n<p class=\"entry-actions\"><a href=\"/edit/{}\">Edit this page</a></p>",
                html,
                urlencoding::encode(title)
            );
            layout(title, &body)
        }
        Page::Edit {
            title,
            content,
            errors,
        } => {
            let mut body = format!("<h1>Edit {}</h1>\n", escape_html(title));
            let _ = write!(
                body,
                "<form action=\"/edit/{}\" method=\"post\">\n",
                urlencoding::encode(title)
            );
            body.push_str(&textarea("content", "Content", content, errors));
            body.push_str("<input type=\"submit\" value=\"Save\" class=\"btn\">\n</form>\n");
            layout(&format!("Edit {}", title), &body)
        }
        Page::New {
            title,
            content,
            errors,
        } => {
            let mut body = String::from("<h1>Create New Page</h1>\n");
            body.push_str("<form action=\"/new\" method=\"post\">\n");
            let _ = write!(
                body,
                "<label for=\"title\">Title</label>\n\
                 <input type=\"text\" id=\"title\" name=\"title\" placeholder=\"Title\" class=\"form-control\" value=\"{}\">\n",
                escape_html(title)
            );
            body.push_str(&field_errors(errors, "title"));
            body.push_str(&textarea("content", "Content", content, errors));
            body.push_str("<input type=\"submit\" value=\"Save\" class=\"btn\">\n</form>\n");
            layout("Create New Page", &body)
        }
        Page::SearchResults { query, entries } => layout(
            "Search Results",
            &entry_list(&format!("Results for \"{}\"", query), entries),
        ),
        Page::Error { message } => layout(
            "Error",
            &format!("<h1>Error</h1>\n<p class=\"error\">{}</p>\n", escape_html(message)),
        ),
    }
}

fn entry_list(heading: &str, entries: &[String]) -> String {
    let mut body = format!("<h1>{}</h1>\n<ul>\n", escape_html(heading));
    for title in entries {
        let _ = writeln!(
            body,
            "<li><a href=\"/wiki/{}\">{}</a></li>",
            urlencoding::encode(title),
            escape_html(title)
        );
    }
    body.push_str("</ul>\n");
    body
}

fn textarea(name: &str, label: &str, value: &str, errors: &[FieldError]) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <textarea id=\"{name}\" name=\"{name}\" placeholder=\"{label}\" class=\"form-control\" rows=\"18\">{}</textarea>\n{}",
        escape_html(value),
        field_errors(errors, name),
    )
}

fn field_errors(errors: &[FieldError], field: &str) -> String {
    let messages = forms::errors_for(errors, field);
    if messages.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"errorlist\">\n");
    for message in messages {
        let _ = writeln!(out, "<li>{}</li>", escape_html(message));
    }
    out.push_str("</ul>\n");
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link href="/static/styles.css" rel="stylesheet">
</head>
<body>
<div class="row">
<div class="sidebar col-lg-2 col-md-3">
<h2>{site}</h2>
<form action="/search" method="post">
<input class="search" type="text" name="q" placeholder="Search Encyclopedia">
</form>
<div><a href="/">Home</a></div>
<div><a href="/new">Create New Page</a></div>
<div><a href="/random">Random Page</a></div>
</div>
<div class="main col-lg-10 col-md-9">
{body}
</div>
</div>
</body>
</html>
"#,
        title = escape_html(title),
        site = SITE_NAME,
        body = body,
    )
}
