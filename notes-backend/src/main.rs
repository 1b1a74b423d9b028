use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use notes_backend::config::{AllowedOrigins, Config};
use notes_backend::db::{Database, NoteStore};
use notes_backend::{controllers, server, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Initializing database at {}", config.database_url);
    let db = match Database::new(&config.database_url, &config.pool_options()) {
        Ok(db) => db,
        Err(e) => {
            log::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    let store: Arc<dyn NoteStore> = Arc::new(db);

    match &config.allowed_origins {
        AllowedOrigins::Any => log::warn!("CORS: any origin allowed"),
        AllowedOrigins::List(list) => log::info!("CORS allowed origins: {:?}", list),
    }
    match &config.frontend_dist {
        Some(dist) => log::info!("Serving frontend from: {}", dist),
        None => log::warn!("Frontend dist not found or disabled - static file serving off"),
    }

    let bind = (config.bind_address.clone(), config.port);
    log::info!("Starting notes server on {}:{}", bind.0, bind.1);

    // One state for the whole process; workers share it through `web::Data`'s Arc.
    let state = web::Data::new(AppState::new(store));

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(server::cors(&config.allowed_origins))
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config);

        // Serve static files only if frontend dist exists
        if let Some(dist) = &config.frontend_dist {
            app = app.configure(|cfg| server::frontend(cfg, dist));
        }

        app.default_service(web::to(server::not_found))
    })
    .bind(bind)?
    .run();

    // Get server handle for graceful shutdown
    let server_handle = server.handle();

    // Spawn Ctrl+C handler
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        // Stop the HTTP server with timeout
        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
