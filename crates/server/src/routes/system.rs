use actix_web::{get, web, HttpResponse};

use crate::state::AppState;
use crate::types::StatsResponse;

/// Liveness check
#[get("/health")]
pub async fn health() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

/// Vocabulary statistics
#[get("/api/stats")]
pub async fn stats(
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let store = &state.store;

    Ok(HttpResponse::Ok().json(StatsResponse {
        vocab_size: store.size(),
        dim: store.dim(),
        fingerprint: store.fingerprint().map(str::to_string),
        source: store.source().map(|p| p.display().to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::Value;

    use crate::state::test_support::test_state;

    #[actix_web::test]
    async fn test_stats() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .configure(crate::configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let json: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["vocab_size"], 4);
        assert_eq!(json["dim"], 3);
        assert!(json["fingerprint"].is_null());
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(crate::configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let json: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["status"], "ok");
    }
}
