use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::ApiError,
    models::SessionUser,
    repository::{comments, filter::SnippetFilter, snippets, users},
    AppState,
};

// _______________________________________ Request shapes _______________________________________

#[derive(Debug, Deserialize)]
pub struct ListSnippetsQuery {
    pub search: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippetRequest {
    #[validate(length(min = 1, max = 100, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 10000, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    pub framework: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, max = 5, message = "Maximum 5 tags allowed"))]
    pub tags: Vec<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

impl CreateSnippetRequest {
    fn into_new_snippet(self) -> snippets::NewSnippet {
        snippets::NewSnippet {
            title: self.title,
            description: self.description,
            code: self.code,
            language: self.language,
            framework: self.framework,
            category: self.category,
            tags: self.tags,
            is_public: self.is_public,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment content is required"))]
    pub content: String,
}

// _______________________________________ Snippet routes _______________________________________

#[get("")]
pub async fn list_snippets(
    app_data: web::Data<AppState>,
    params: web::Query<ListSnippetsQuery>,
) -> Result<impl Responder, ApiError> {
    let params = params.into_inner();
    let filter = SnippetFilter::public()
        .with_search(params.search)
        .with_language(params.language)
        .with_framework(params.framework)
        .with_category(params.category);

    let records = snippets::list(&app_data.db, &filter).await?;
    Ok(HttpResponse::Ok().json(records))
}

#[get("/my")]
pub async fn my_snippets(
    app_data: web::Data<AppState>,
    session: Option<web::ReqData<SessionUser>>,
) -> Result<impl Responder, ApiError> {
    let session = session.ok_or(ApiError::Unauthorized)?;

    let filter = SnippetFilter::authored_by(session.id);
    let records = snippets::list(&app_data.db, &filter).await?;
    Ok(HttpResponse::Ok().json(records))
}

#[post("")]
pub async fn create_snippet(
    app_data: web::Data<AppState>,
    session: Option<web::ReqData<SessionUser>>,
    data_json: web::Json<CreateSnippetRequest>,
) -> Result<impl Responder, ApiError> {
    let session = session.ok_or(ApiError::Unauthorized)?;
    data_json.validate()?;

    let user = users::find_by_email(&app_data.db, &session.email)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let snippet =
        snippets::create(&app_data.db, data_json.into_inner().into_new_snippet(), user.id).await?;
    Ok(HttpResponse::Ok().json(snippet))
}

#[get("/{snippetId}")]
pub async fn get_snippet(
    app_data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let snippet_id = path.into_inner();

    let snippet = snippets::get_by_id(&app_data.db, snippet_id)
        .await?
        .ok_or(ApiError::NotFound("Snippet"))?;
    Ok(HttpResponse::Ok().json(snippet))
}

#[post("/{snippetId}/comments")]
pub async fn create_comment(
    app_data: web::Data<AppState>,
    path: web::Path<Uuid>,
    session: Option<web::ReqData<SessionUser>>,
    data_json: web::Json<CreateCommentRequest>,
) -> Result<impl Responder, ApiError> {
    let session = session.ok_or(ApiError::Unauthorized)?;
    data_json.validate()?;

    let snippet_id = path.into_inner();
    if !snippets::exists(&app_data.db, snippet_id).await? {
        return Err(ApiError::NotFound("Snippet"));
    }

    let comment =
        comments::create(&app_data.db, snippet_id, session.id, &data_json.content).await?;
    Ok(HttpResponse::Ok().json(comment))
}
