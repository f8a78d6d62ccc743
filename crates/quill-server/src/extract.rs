use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use quill_shared::api::PublishRequest;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::documents::DOCUMENT_NOT_FOUND;

/// `axum::Json` whose rejections render as the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Document id taken from the path.
///
/// Anything that cannot name a stored document (undecodable percent
/// escapes, non-UUID text) is reported as not found.
#[derive(Debug, Clone, Copy)]
pub struct DocumentId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for DocumentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(DOCUMENT_NOT_FOUND))?;

        Uuid::parse_str(&raw)
            .map(DocumentId)
            .map_err(|_| AppError::NotFound(DOCUMENT_NOT_FOUND))
    }
}

const UPLOAD_UNREADABLE: &str =
    "Could not read uploaded file. Please ensure it's a valid UTF-8 Markdown file.";

/// Publish form, accepted either as JSON or as `multipart/form-data`.
///
/// In the multipart form a `fileInput` part with a non-empty file name
/// replaces the `markdown` field with the file's contents.
#[derive(Debug)]
pub struct PublishForm(pub PublishRequest);

#[async_trait]
impl<S> FromRequest<S> for PublishForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let AppJson(form) = AppJson::<PublishRequest>::from_request(req, state).await?;
            return Ok(PublishForm(form));
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut form = PublishRequest::default();
        let mut upload = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "fileInput" {
                let has_file = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field.bytes().await?;
                if has_file {
                    upload = Some(bytes);
                }
                continue;
            }

            let text = field.text().await?;
            match name.as_str() {
                "token" => form.token = text,
                "title" => form.title = text,
                "author" => form.author = Some(text),
                "authorUrl" => form.author_url = Some(text),
                "markdown" => form.markdown = text,
                _ => {}
            }
        }

        if let Some(bytes) = upload {
            form.markdown = String::from_utf8(bytes.to_vec())
                .map_err(|_| AppError::Validation(UPLOAD_UNREADABLE.to_string()))?;
        }

        Ok(PublishForm(form))
    }
}
