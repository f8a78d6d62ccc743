use axum::{extract::State, http::StatusCode, Json};
use quill_shared::{
    api::{ApiResponse, CreateDocumentRequest, DeletedDocument, UpdateDocumentRequest},
    Document, DEFAULT_AUTHOR,
};

use crate::error::AppError;
use crate::extract::{AppJson, DocumentId};
use crate::routes::AppState;
use crate::sanitize::sanitize;
use crate::store::{DocumentChanges, NewDocument};

pub(crate) const DOCUMENT_NOT_FOUND: &str = "Document not found";
const TITLE_REQUIRED: &str = "Title is required";

fn required_title(title: Option<String>) -> Result<String, AppError> {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation(TITLE_REQUIRED.to_string()))
}

impl TryFrom<CreateDocumentRequest> for NewDocument {
    type Error = AppError;

    fn try_from(req: CreateDocumentRequest) -> Result<Self, Self::Error> {
        let title = required_title(req.title)?;
        let author = req
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        Ok(NewDocument {
            title,
            content: sanitize(&req.content.unwrap_or_default()),
            author,
            tags: req.tags.unwrap_or_default(),
        })
    }
}

impl TryFrom<UpdateDocumentRequest> for DocumentChanges {
    type Error = AppError;

    fn try_from(req: UpdateDocumentRequest) -> Result<Self, Self::Error> {
        Ok(DocumentChanges {
            title: required_title(req.title)?,
            content: sanitize(&req.content.unwrap_or_default()),
            tags: req.tags.unwrap_or_default(),
        })
    }
}

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Document>>>, AppError> {
    let documents = state.store.list().await?;

    Ok(Json(ApiResponse::ok(documents)))
}

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), AppError> {
    let new_doc = NewDocument::try_from(req)?;
    let document = state.store.insert(new_doc).await?;

    tracing::info!(id = %document.id, "document created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// GET /api/documents/:id
pub async fn get_document(
    State(state): State<AppState>,
    DocumentId(id): DocumentId,
) -> Result<Json<ApiResponse<Document>>, AppError> {
    let document = state
        .store
        .find(id)
        .await?
        .ok_or(AppError::NotFound(DOCUMENT_NOT_FOUND))?;

    Ok(Json(ApiResponse::ok(document)))
}

/// PUT /api/documents/:id
pub async fn update_document(
    State(state): State<AppState>,
    DocumentId(id): DocumentId,
    AppJson(req): AppJson<UpdateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, AppError> {
    let changes = DocumentChanges::try_from(req)?;

    let document = state
        .store
        .update(id, changes)
        .await?
        .ok_or(AppError::NotFound(DOCUMENT_NOT_FOUND))?;

    tracing::info!(%id, "document updated");
    Ok(Json(ApiResponse::ok(document)))
}

/// DELETE /api/documents/:id
pub async fn delete_document(
    State(state): State<AppState>,
    DocumentId(id): DocumentId,
) -> Result<Json<ApiResponse<DeletedDocument>>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(DOCUMENT_NOT_FOUND));
    }

    tracing::info!(%id, "document deleted");
    Ok(Json(ApiResponse::ok(DeletedDocument { id })))
}
