use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use quill_shared::api::ApiResponse;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{documents as document_handlers, publish as publish_handlers};
use crate::store::DocumentStore;
use crate::telegraph::TelegraphClient;
use crate::Config;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub telegraph: TelegraphClient,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> anyhow::Result<Self> {
        let telegraph = TelegraphClient::new(&config.telegraph_api_url, config.publish_timeout)?;

        Ok(Self { store, telegraph })
    }
}

pub fn create_router(state: AppState) -> Router {
    let document_routes = Router::new()
        .route(
            "/",
            get(document_handlers::list_documents)
                .post(document_handlers::create_document)
                .fallback(method_not_allowed),
        )
        .route(
            "/:id",
            get(document_handlers::get_document)
                .put(document_handlers::update_document)
                .delete(document_handlers::delete_document)
                .fallback(method_not_allowed),
        );

    let publish_routes = Router::new()
        .route(
            "/",
            post(publish_handlers::publish_markdown).fallback(method_not_allowed),
        )
        .route(
            "/account",
            post(publish_handlers::create_account).fallback(method_not_allowed),
        );

    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .nest("/api/documents", document_routes)
        .nest("/api/publish", publish_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::failure("Not found")))
}

async fn method_not_allowed() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::failure("Method not allowed")),
    )
}
