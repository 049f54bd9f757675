use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{errors::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct GenerateSnippetRequest {
    pub prompt: String,
}

/// Every failure mode (transport, upstream status, unrecoverable output)
/// collapses into the one generic generation error; the cause stays in the
/// server log.
#[post("/generate-snippet")]
pub async fn generate_snippet(
    app_data: web::Data<AppState>,
    data_json: web::Json<GenerateSnippetRequest>,
) -> Result<impl Responder, ApiError> {
    let draft = app_data
        .gemini
        .generate(&data_json.prompt)
        .await
        .map_err(|err| {
            log::error!("snippet generation failed: {err}");
            ApiError::Generation
        })?;

    Ok(HttpResponse::Ok().json(draft))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::json;

    use crate::{handlers::test_support::test_state, routes};

    #[actix_web::test]
    async fn unreachable_upstream_maps_to_the_generic_failure() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/api").configure(routes::ai_routes::config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/ai/generate-snippet")
            .set_json(json!({ "prompt": "a debounce helper" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to generate snippet. Please try again.");
    }
}
