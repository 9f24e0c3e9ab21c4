//! Entries REST API — read-only JSON endpoints.
//!
//! Provides entry listing, title search (`GET /api/entries?q=`) and entry
//! reading. All mutations go through the HTML forms.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::wiki::markdown::render_markdown;
use crate::wiki::{search, WikiError};

// --- List entries ---

#[derive(Debug, Serialize)]
struct EntryItem {
    title: String,
    size: u64,
    modified: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListEntriesResponse {
    success: bool,
    entries: Vec<EntryItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListEntriesQuery {
    q: Option<String>,
}

async fn list_entries(
    data: web::Data<AppState>,
    query: web::Query<ListEntriesQuery>,
) -> impl Responder {
    if let Some(q) = query.into_inner().q {
        return search_entries(&data, q.trim());
    }

    let titles = match data.store.list_entries() {
        Ok(titles) => titles,
        Err(e) => {
            log::error!("[WIKI] Failed to list entries: {}", e);
            return HttpResponse::InternalServerError().json(ListEntriesResponse {
                success: false,
                entries: vec![],
                error: Some(format!("Failed to list entries: {}", e)),
            });
        }
    };

    // An entry removed between listing and stat is simply skipped
    let entries = titles
        .iter()
        .filter_map(|title| data.store.entry_info(title).ok())
        .map(|info| EntryItem {
            title: info.title,
            size: info.size,
            modified: info
                .modified
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        })
        .collect();

    HttpResponse::Ok().json(ListEntriesResponse {
        success: true,
        entries,
        error: None,
    })
}

// --- Read entry ---

#[derive(Debug, Serialize)]
struct ReadEntryResponse {
    success: bool,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn read_entry(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let title = path.into_inner();

    match data.store.get_entry(&title) {
        Ok(content) => HttpResponse::Ok().json(ReadEntryResponse {
            success: true,
            html: Some(render_markdown(&content)),
            content: Some(content),
            title,
            error: None,
        }),
        Err(e @ WikiError::EntryNotFound(_)) => HttpResponse::NotFound().json(ReadEntryResponse {
            success: false,
            title,
            content: None,
            html: None,
            error: Some(e.to_string()),
        }),
        Err(e) => {
            log::error!("[WIKI] Failed to read entry {:?}: {}", title, e);
            HttpResponse::InternalServerError().json(ReadEntryResponse {
                success: false,
                title,
                content: None,
                html: None,
                error: Some(format!("Failed to read entry: {}", e)),
            })
        }
    }
}

// --- Search entries ---

#[derive(Debug, Serialize)]
struct SearchEntriesResponse {
    success: bool,
    query: String,
    exact_match: Option<String>,
    results: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn search_entries(data: &AppState, q: &str) -> HttpResponse {
    let q = q.to_string();

    match data.store.list_entries() {
        Ok(titles) => {
            let result = search::find(&q, &titles);
            HttpResponse::Ok().json(SearchEntriesResponse {
                success: true,
                query: q,
                exact_match: result.exact_match,
                results: result.substring_matches,
                error: None,
            })
        }
        Err(e) => {
            log::error!("[WIKI] Search failed: {}", e);
            HttpResponse::InternalServerError().json(SearchEntriesResponse {
                success: false,
                query: q,
                exact_match: None,
                results: vec![],
                error: Some(format!("Search failed: {}", e)),
            })
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/entries")
            .route("", web::get().to(list_entries))
            .route("/{title}", web::get().to(read_entry)),
    );
}
