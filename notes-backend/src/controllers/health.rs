use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
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

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::sync::Arc;

    use crate::db::InMemoryNoteStore;

    #[actix_web::test]
    async fn test_health_reports_ok_and_version() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(Arc::new(InMemoryNoteStore::new()))))
                .configure(config_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], VERSION);

        let req = test::TestRequest::get().uri("/api/version").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["version"], VERSION);
    }
}
