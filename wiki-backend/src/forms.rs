//! Form payloads and their validation.
//!
//! Forms are deserialized fresh for every request. Validation either yields
//! the cleaned values or the list of field errors to show next to the inputs.

use serde::Deserialize;

use crate::wiki::file_ops::{self, MAX_TITLE_BYTES, MAX_TITLE_CHARS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Messages for `field`, in the order they were raised
pub fn errors_for<'a>(errors: &'a [FieldError], field: &str) -> Vec<&'a str> {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| e.message.as_str())
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewPageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub title: String,
    pub content: String,
}

/// Browsers submit textarea content with CRLF line endings
fn clean_content(raw: &str) -> String {
    raw.replace("\r\n", "\n").trim().to_string()
}

fn check_content(content: &str, errors: &mut Vec<FieldError>) {
    if content.is_empty() {
        errors.push(FieldError::new("content", "This field is required."));
    }
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    if title.is_empty() {
        errors.push(FieldError::new("title", "This field is required."));
    } else if title.chars().count() > MAX_TITLE_CHARS {
        errors.push(FieldError::new(
            "title",
            format!("Titles are limited to {} characters.", MAX_TITLE_CHARS),
        ));
    } else if title.len() > MAX_TITLE_BYTES {
        errors.push(FieldError::new(
            "title",
            format!(
                "Titles are limited to {} bytes; accented and non-Latin characters count as several.",
                MAX_TITLE_BYTES
            ),
        ));
    } else if !file_ops::is_valid_title(title) {
        errors.push(FieldError::new(
            "title",
            "Titles cannot start with '.' or contain slashes or control characters.",
        ));
    }
}

/// Cleaned search query; None when the query is blank
pub fn clean_search(form: &SearchForm) -> Option<String> {
    let query = form.q.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_string())
    }
}

pub fn validate_edit(form: &EditForm) -> Result<String, Vec<FieldError>> {
    let content = clean_content(&form.content);
    let mut errors = Vec::new();
    check_content(&content, &mut errors);
    if errors.is_empty() {
        Ok(content)
    } else {
        Err(errors)
    }
}

pub fn validate_new_page(form: &NewPageForm) -> Result<NewPage, Vec<FieldError>> {
    let title = form.title.trim().to_string();
    let content = clean_content(&form.content);

    let mut errors = Vec::new();
    check_title(&title, &mut errors);
    check_content(&content, &mut errors);

    if errors.is_empty() {
        Ok(NewPage { title, content })
    } else {
        Err(errors)
    }
}
