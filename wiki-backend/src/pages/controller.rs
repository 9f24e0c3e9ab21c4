//! Page controller — one decision procedure per user-facing operation.
//!
//! Operations return `Ok(Outcome)` for the happy paths and the user-facing
//! `WikiError` kinds otherwise. `recover` turns recoverable errors into a
//! redirect to the error page; only storage failures escape.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::forms::{self, EditForm, FieldError, NewPageForm, SearchForm};
use crate::wiki::markdown::render_markdown;
use crate::wiki::search;
use crate::wiki::{EntryStore, WikiError, WikiResult};

/// Where a redirect points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index,
    Entry(String),
    Error(String),
}

impl Target {
    pub fn url(&self) -> String {
        match self {
            Target::Index => "/".to_string(),
            Target::Entry(title) => format!("/wiki/{}", urlencoding::encode(title)),
            Target::Error(message) => format!("/error/{}", urlencoding::encode(message)),
        }
    }
}

/// Everything a view needs to render one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Index {
        entries: Vec<String>,
    },
    Entry {
        title: String,
        html: String,
    },
    Edit {
        title: String,
        content: String,
        errors: Vec<FieldError>,
    },
    New {
        title: String,
        content: String,
        errors: Vec<FieldError>,
    },
    SearchResults {
        query: String,
        entries: Vec<String>,
    },
    Error {
        message: String,
    },
}

impl Page {
    /// A form re-rendered because its submission failed validation
    pub fn has_errors(&self) -> bool {
        match self {
            Page::Edit { errors, .. } | Page::New { errors, .. } => !errors.is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(Page),
    Redirect(Target),
}

/// Convert recoverable errors into a redirect to the error page
pub fn recover(result: WikiResult<Outcome>) -> WikiResult<Outcome> {
    match result {
        Err(e) if e.is_recoverable() => {
            log::debug!("[PAGES] {:?}", e);
            Ok(Outcome::Redirect(Target::Error(e.to_string())))
        }
        other => other,
    }
}

pub fn index(store: &EntryStore) -> WikiResult<Outcome> {
    Ok(Outcome::Render(Page::Index {
        entries: store.list_entries()?,
    }))
}

pub fn view(store: &EntryStore, title: &str) -> WikiResult<Outcome> {
    let content = store.get_entry(title)?;
    Ok(Outcome::Render(Page::Entry {
        title: title.to_string(),
        html: render_markdown(&content),
    }))
}

/// Edit form pre-filled with the stored content. A title with no entry yet
/// gets a blank form; saving it creates the entry.
pub fn edit_form(store: &EntryStore, title: &str) -> WikiResult<Outcome> {
    let content = match store.get_entry(title) {
        Ok(content) => content,
        Err(WikiError::EntryNotFound(_)) => String::new(),
        Err(e) => return Err(e),
    };
    Ok(Outcome::Render(Page::Edit {
        title: title.to_string(),
        content,
        errors: Vec::new(),
    }))
}

pub fn edit_submit(store: &EntryStore, title: &str, form: &EditForm) -> WikiResult<Outcome> {
    match forms::validate_edit(form) {
        Ok(content) => {
            store.save_entry(title, &content)?;
            Ok(Outcome::Redirect(Target::Entry(title.to_string())))
        }
        Err(errors) => Ok(Outcome::Render(Page::Edit {
            title: title.to_string(),
            content: form.content.clone(),
            errors,
        })),
    }
}

pub fn search(store: &EntryStore, form: &SearchForm) -> WikiResult<Outcome> {
    let Some(query) = forms::clean_search(form) else {
        return Ok(Outcome::Redirect(Target::Index));
    };

    let titles = store.list_entries()?;
    let result = search::find(&query, &titles);

    if let Some(title) = result.exact_match {
        return Ok(Outcome::Redirect(Target::Entry(title)));
    }
    if result.is_empty() {
        return Err(WikiError::NoSearchResults(query));
    }
    Ok(Outcome::Render(Page::SearchResults {
        query,
        entries: result.substring_matches,
    }))
}

pub fn new_form() -> Outcome {
    Outcome::Render(Page::New {
        title: String::new(),
        content: String::new(),
        errors: Vec::new(),
    })
}

/// Create a new entry. Existing titles are never overwritten from here.
pub fn new_submit(store: &EntryStore, form: &NewPageForm) -> WikiResult<Outcome> {
    let page = match forms::validate_new_page(form) {
        Ok(page) => page,
        Err(errors) => {
            return Ok(Outcome::Render(Page::New {
                title: form.title.clone(),
                content: form.content.clone(),
                errors,
            }));
        }
    };

    let titles = store.list_entries()?;
    if titles.iter().any(|t| *t == page.title) {
        return Err(WikiError::DuplicateTitle(page.title));
    }

    store.save_entry(&page.title, &page.content)?;
    Ok(Outcome::Redirect(Target::Entry(page.title)))
}

pub fn random<R: Rng + ?Sized>(store: &EntryStore, rng: &mut R) -> WikiResult<Outcome> {
    let titles = store.list_entries()?;
    let title = titles.choose(rng).ok_or(WikiError::EmptyStore)?;
    Ok(Outcome::Redirect(Target::Entry(title.clone())))
}

pub fn error_page(message: &str) -> Outcome {
    Outcome::Render(Page::Error {
        message: message.to_string(),
    })
}
