use axum::{extract::State, Json};
use quill_shared::api::{ApiResponse, CreateAccountRequest, PublishedPage, TelegraphAccount};

use crate::error::AppError;
use crate::extract::{AppJson, PublishForm};
use crate::markdown::render_markdown;
use crate::routes::AppState;
use crate::telegraph::PageRequest;

/// POST /api/publish (JSON or multipart form)
pub async fn publish_markdown(
    State(state): State<AppState>,
    PublishForm(req): PublishForm,
) -> Result<Json<ApiResponse<PublishedPage>>, AppError> {
    let token = req.token.trim();
    let title = req.title.trim();
    let markdown = req.markdown.trim();

    if token.is_empty() || title.is_empty() || markdown.is_empty() {
        return Err(AppError::Validation(
            "Token, title, and Markdown content are required.".to_string(),
        ));
    }

    let content = render_markdown(markdown);
    let page = PageRequest {
        access_token: token,
        title,
        author_name: req.author.as_deref().map(str::trim).unwrap_or_default(),
        author_url: req.author_url.as_deref().map(str::trim).unwrap_or_default(),
        content: &content,
        return_content: false,
    };

    let url = state.telegraph.create_page(&page).await?;

    tracing::info!(%url, "article published");
    Ok(Json(ApiResponse::ok(PublishedPage { url })))
}

/// POST /api/publish/account
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateAccountRequest>,
) -> Result<Json<ApiResponse<TelegraphAccount>>, AppError> {
    let short_name = req.short_name.trim();
    if short_name.is_empty() {
        return Err(AppError::Validation("Short name is required".to_string()));
    }

    let account = state.telegraph.create_account(short_name).await?;

    Ok(Json(ApiResponse::ok(account)))
}
