use actix_web::{post, web, HttpResponse};
use tracing::{debug, error};
use wordmap_common::WordmapError;
use wordmap_vector::parse_top_n;

use crate::routes::{error_response, explore_blocking};
use crate::state::AppState;
use crate::types::{SimilarRequest, SimilarResponse};

/// Neighbors and plot points as JSON
#[post("/api/similar")]
pub async fn similar(
    req: web::Json<SimilarRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let word = req.word.trim().to_string();
    let top_n = parse_top_n(req.topn_text().as_deref());

    debug!("API lookup: word='{}', topn={}", word, top_n);

    if word.is_empty() {
        return Ok(error_response(&WordmapError::invalid_input("empty input")));
    }

    match explore_blocking(&state, word, top_n).await {
        Ok(exploration) => Ok(HttpResponse::Ok().json(SimilarResponse::from(exploration))),
        Err(e) => {
            if !e.is_recoverable() {
                error!("API lookup failed: {}", e);
            }
            Ok(error_response(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::state::test_support::test_state;

    async fn call(body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .configure(crate::configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/similar")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let json: Value = test::read_body_json(resp).await;
        (status, json)
    }

    #[actix_web::test]
    async fn test_similar_found() {
        let (status, json) = call(json!({ "word": "cat", "topn": 1 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["topn"], 1);
        assert_eq!(json["neighbors"].as_array().unwrap().len(), 1);
        assert_eq!(json["neighbors"][0]["word"], "dog");
        let score = json["neighbors"][0]["score"].as_f64().unwrap();
        assert!((score - 0.994).abs() < 1e-3);

        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["label"], "cat");
        assert_eq!(points[0]["is_query"], true);
    }

    #[actix_web::test]
    async fn test_similar_returns_all_when_count_exceeds_vocabulary() {
        let (status, json) = call(json!({ "word": "cat", "topn": "10" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["topn"], 10);
        assert_eq!(json["neighbors"].as_array().unwrap().len(), 3);
        assert_eq!(json["points"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn test_similar_bad_count() {
        let (status, json) = call(json!({ "word": "cat", "topn": "abc" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["topn"], 5);
    }

    #[actix_web::test]
    async fn test_similar_unknown_word() {
        let (status, json) = call(json!({ "word": "xyz" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Word not found in vocabulary.");
    }

    #[actix_web::test]
    async fn test_similar_empty_word() {
        let (status, json) = call(json!({ "word": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please enter a word.");
    }
}
