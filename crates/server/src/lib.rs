//! Wordmap HTTP Server
//!
//! Actix-web 기반 단어 검색 페이지 및 JSON API

pub mod page;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use wordmap_common::{AppConfig, Result};

pub use state::AppState;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::explore::index)
        .service(routes::explore::submit)
        .service(routes::api::similar)
        .service(routes::system::stats)
        .service(routes::system::health);
}

/// Load the vocabulary and serve until shutdown
///
/// A vocabulary that fails to load aborts startup.
pub async fn start_server(config: AppConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let bind_addr = state.config.server_bind_address();

    info!(
        "Serving {} words (dim {}) on http://{}",
        state.store.size(),
        state.store.dim(),
        bind_addr
    );

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
