//! HTML wiki routes — browse, search, create and edit entries.
//!
//! Handlers only extract the request, call the page controller and turn its
//! outcome into a response. Redirects use 302 with a percent-encoded target.

use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::AppState;
use crate::forms::{EditForm, NewPageForm, SearchForm};
use crate::pages::{controller, views, Outcome, Page};
use crate::wiki::WikiResult;

fn html_page(status: StatusCode, page: &Page) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(views::render(page))
}

/// Turn a controller result into an HTTP response
fn respond(result: WikiResult<Outcome>) -> HttpResponse {
    match controller::recover(result) {
        Ok(Outcome::Redirect(target)) => HttpResponse::Found()
            .append_header((header::LOCATION, target.url()))
            .finish(),
        Ok(Outcome::Render(page)) => {
            let status = if page.has_errors() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::OK
            };
            html_page(status, &page)
        }
        Err(e) => {
            log::error!("[WIKI] Request failed: {}", e);
            html_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                &Page::Error {
                    message: "The wiki could not read or write its entries. Please try again later."
                        .to_string(),
                },
            )
        }
    }
}

async fn index(data: web::Data<AppState>) -> HttpResponse {
    respond(controller::index(&data.store))
}

async fn view_entry(data: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    respond(controller::view(&data.store, &path.into_inner()))
}

async fn edit_form(data: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    respond(controller::edit_form(&data.store, &path.into_inner()))
}

async fn edit_submit(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<EditForm>,
) -> HttpResponse {
    respond(controller::edit_submit(&data.store, &path.into_inner(), &form))
}

async fn search(data: web::Data<AppState>, form: web::Form<SearchForm>) -> HttpResponse {
    respond(controller::search(&data.store, &form))
}

async fn new_form() -> HttpResponse {
    respond(Ok(controller::new_form()))
}

async fn new_submit(data: web::Data<AppState>, form: web::Form<NewPageForm>) -> HttpResponse {
    respond(controller::new_submit(&data.store, &form))
}

async fn random_entry(data: web::Data<AppState>) -> HttpResponse {
    let mut rng = rand::thread_rng();
    respond(controller::random(&data.store, &mut rng))
}

async fn error_page(path: web::Path<String>) -> HttpResponse {
    respond(Ok(controller::error_page(&path.into_inner())))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/wiki/{title}", web::get().to(view_entry))
        .service(
            web::resource("/edit/{title}")
                .route(web::get().to(edit_form))
                .route(web::post().to(edit_submit)),
        )
        .route("/search", web::post().to(search))
        .service(
            web::resource("/new")
                .route(web::get().to(new_form))
                .route(web::post().to(new_submit)),
        )
        .route("/random", web::get().to(random_entry))
        .route("/error/{message}", web::get().to(error_page));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::wiki::EntryStore;
    use actix_web::dev::ServiceResponse;
    use actix_web::{test, App};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn test_state(dir: &tempfile::TempDir) -> web::Data<AppState> {
        let mut config = Config::from_lookup(|_| None);
        config.entries_dir = dir.path().join("entries");
        let store = EntryStore::new(config.entries_dir.clone()).expect("Failed to create store");
        web::Data::new(AppState {
            store: Arc::new(store),
            config,
            started_at: std::time::Instant::now(),
        })
    }

    fn location(resp: &ServiceResponse) -> String {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn body_text(resp: ServiceResponse) -> String {
        let body = test::read_body(resp).await;
        String::from_utf8_lossy(&body).to_string()
    }

    #[actix_web::test]
    async fn test_index_lists_entries() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        state.store.save_entry("CSS", "# CSS").unwrap();
        state.store.save_entry("Git", "# Git").unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("href=\"/wiki/CSS\""));
        assert!(body.contains("href=\"/wiki/Git\""));
    }

    #[actix_web::test]
    async fn test_view_entry() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        state.store.save_entry("C Sharp", "# C Sharp\n\nA *language*.").unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::get().uri("/wiki/C%20Sharp").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("<h1>C Sharp</h1>"));
        assert!(body.contains("<em>language</em>"));
    }

    #[actix_web::test]
    async fn test_view_missing_redirects_to_error() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::get().uri("/wiki/Nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/error/Requested%20page%20does%20not%20exist.");
    }

    #[actix_web::test]
    async fn test_error_page_shows_message() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::get().uri("/error/0%20matches%20found%21").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("0 matches found!"));
    }

    #[actix_web::test]
    async fn test_search_flows() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        for title in ["Python", "Java", "Ruby"] {
            state.store.save_entry(title, "body").unwrap();
        }
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::post().uri("/search").set_form([("q", "Ruby")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/wiki/Ruby");

        let req = test::TestRequest::post().uri("/search").set_form([("q", "py")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("href=\"/wiki/Python\""));
        assert!(!body.contains("href=\"/wiki/Java\""));

        let req = test::TestRequest::post().uri("/search").set_form([("q", "Haskell")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/error/0%20matches%20found%21");
    }

    #[actix_web::test]
    async fn test_new_entry_flow() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/new").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/new")
            .set_form([("title", "Rust"), ("content", "# Rust")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/wiki/Rust");
        assert_eq!(state.store.get_entry("Rust").unwrap(), "# Rust");

        let req = test::TestRequest::post()
            .uri("/new")
            .set_form([("title", "Rust"), ("content", "replacement")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            location(&resp),
            "/error/This%20title%20already%20exist%2C%20please%20provide%20another%20title."
        );
        assert_eq!(state.store.get_entry("Rust").unwrap(), "# Rust");
    }

    #[actix_web::test]
    async fn test_new_entry_invalid_form() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/new")
            .set_form([("title", "Draft"), ("content", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(resp).await;
        assert!(body.contains("errorlist"));
        assert!(body.contains("value=\"Draft\""));
        assert!(state.store.list_entries().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_edit_flow() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        state.store.save_entry("Git", "# Git").unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/edit/Git").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("># Git</textarea>"));

        let req = test::TestRequest::post()
            .uri("/edit/Git")
            .set_form([("content", "# Git\r\n\r\nRevised")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/wiki/Git");
        assert_eq!(state.store.get_entry("Git").unwrap(), "# Git\n\nRevised");

        let req = test::TestRequest::post()
            .uri("/edit/Git")
            .set_form([("content", "  ")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.store.get_entry("Git").unwrap(), "# Git\n\nRevised");
    }

    #[actix_web::test]
    async fn test_random() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/random").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/error/There%20are%20no%20entries%20yet.");

        state.store.save_entry("HTML", "# HTML").unwrap();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/random").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/wiki/HTML");
    }
}
