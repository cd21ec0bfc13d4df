use actix_web::{get, http::header::ContentType, post, web, HttpResponse};
use tracing::{error, info};
use wordmap_common::WordmapError;
use wordmap_vector::parse_top_n;

use crate::page::{self, PageView};
use crate::routes::explore_blocking;
use crate::state::AppState;
use crate::types::ExploreForm;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Blank search form
#[get("/")]
pub async fn index() -> actix_web::Result<HttpResponse> {
    Ok(html(page::render(&PageView::empty())))
}

/// Form submission: neighbors table plus plot points, or a message
#[post("/")]
pub async fn submit(
    form: web::Form<ExploreForm>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let form = form.into_inner();
    let word = form.word.unwrap_or_default().trim().to_string();
    let top_n = parse_top_n(form.topn.as_deref());

    info!("Lookup requested: word='{}', topn={}", word, top_n);

    let outcome = if word.is_empty() {
        Err(WordmapError::invalid_input("empty input"))
    } else {
        explore_blocking(&state, word.clone(), top_n).await
    };

    let body = match outcome {
        Ok(exploration) => page::render(&PageView {
            word: &word,
            top_n,
            message: None,
            exploration: Some(&exploration),
        }),
        Err(e) if e.is_recoverable() => page::render(&PageView {
            word: &word,
            top_n,
            message: Some(e.user_message()),
            exploration: None,
        }),
        Err(e) => {
            error!("Lookup failed for '{}': {}", word, e);
            return Err(actix_web::error::ErrorInternalServerError(e));
        }
    };

    Ok(html(body))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};

    use crate::state::test_support::test_state;

    async fn post_form(form: &[(&str, &str)]) -> String {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .configure(crate::configure),
        )
        .await;
        let req = test::TestRequest::post().uri("/").set_form(form).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_index_form() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .configure(crate::configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("<form"));
    }

    #[actix_web::test]
    async fn test_submit_found() {
        let html = post_form(&[("word", " cat "), ("topn", "2")]).await;
        assert!(html.contains("Top 2 Similar Words to &#39;cat&#39;"));
        assert!(html.contains("<td>고양이</td>"));
        assert!(html.contains("plot-data"));
    }

    #[actix_web::test]
    async fn test_submit_unknown_word() {
        let html = post_form(&[("word", "xyz"), ("topn", "3")]).await;
        assert!(html.contains("Word not found in vocabulary."));
        assert!(!html.contains("plot-data"));
    }

    #[actix_web::test]
    async fn test_submit_empty_word() {
        let html = post_form(&[("word", "   ")]).await;
        assert!(html.contains("Please enter a word."));
    }

    #[actix_web::test]
    async fn test_submit_bad_count_uses_default() {
        let html = post_form(&[("word", "cat"), ("topn", "abc")]).await;
        assert!(html.contains("Top 5 Similar Words to &#39;cat&#39;"));
        assert!(html.contains("name=\"topn\" value=\"5\""));
    }
}
