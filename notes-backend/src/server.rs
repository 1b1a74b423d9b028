//! HTTP plumbing around the API: CORS policy and static SPA serving.

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use notes_types::MessageResponse;
use std::path::PathBuf;

use crate::config::AllowedOrigins;

/// CORS middleware for the configured allow-list.
///
/// Requests without an `Origin` header (curl, server-to-server) are never
/// blocked; browsers from unlisted origins get no CORS grant.
pub fn cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

/// Serve the built frontend at `/`, falling back to `index.html` for client routes.
pub fn frontend(cfg: &mut web::ServiceConfig, dist: &str) {
    let index = PathBuf::from(dist).join("index.html");
    cfg.service(
        Files::new("/", dist)
            .index_file("index.html")
            .default_handler(web::to(move |req: HttpRequest| {
                spa_fallback(req, index.clone())
            })),
    );
}

async fn spa_fallback(req: HttpRequest, index: PathBuf) -> actix_web::Result<HttpResponse> {
    // Unknown API paths must not turn into the SPA shell.
    if req.path().starts_with("/api") {
        return Ok(not_found().await);
    }
    Ok(NamedFile::open_async(index).await?.into_response(&req))
}

/// JSON 404 for anything no route claimed.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::new("Not found"))
}
