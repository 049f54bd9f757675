use actix_web::{patch, web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::ApiError,
    models::SessionUser,
    repository::users,
    AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

#[patch("/profile")]
pub async fn update_profile(
    app_data: web::Data<AppState>,
    session: Option<web::ReqData<SessionUser>>,
    data_json: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, ApiError> {
    let session = session.ok_or(ApiError::Unauthorized)?;
    data_json.validate()?;

    let user = users::update_name(&app_data.db, &session.email, &data_json.name).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::json;

    use crate::{
        handlers::test_support::{bearer_for, test_state, test_user},
        middleware::jwt_middleware::ExtractSession,
        routes,
    };

    #[actix_web::test]
    async fn profile_update_without_session_is_unauthorized() {
        let state = test_state();
        let app = test::init_service(
            App::new().app_data(state.clone()).service(
                web::scope("/api")
                    .configure(routes::user_routes::config)
                    .wrap(ExtractSession::new(state.clone())),
            ),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/user/profile")
            .set_json(json!({ "name": "Ada" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn empty_name_fails_validation() {
        let state = test_state();
        let app = test::init_service(
            App::new().app_data(state.clone()).service(
                web::scope("/api")
                    .configure(routes::user_routes::config)
                    .wrap(ExtractSession::new(state.clone())),
            ),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/api/user/profile")
            .insert_header(("Authorization", bearer_for(&test_user())))
            .set_json(json!({ "name": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let errors: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(errors[0]["path"], "name");
        assert_eq!(errors[0]["message"], "Name is required");
    }
}
