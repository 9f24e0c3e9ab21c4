use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
    cfg.service(web::resource("/api/health/config").route(web::get().to(get_config_status)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs()
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}

async fn get_config_status(state: web::Data<AppState>) -> impl Responder {
    let entries_dir = state.store.entries_dir();
    let entry_count = state.store.list_entries().map(|t| t.len()).unwrap_or(0);

    HttpResponse::Ok().json(serde_json::json!({
        "entries_dir": entries_dir.to_string_lossy(),
        "entries_dir_exists": entries_dir.is_dir(),
        "entry_count": entry_count,
        "static_dir_exists": state.config.static_dir.is_dir()
    }))
}
