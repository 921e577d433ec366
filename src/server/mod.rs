//! JSON API server

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::{BlogError, ErrorKind};
use crate::helpers::PostFilter;
use crate::service::BlogService;
use crate::NotionBlog;

/// Server state
struct ServerState {
    service: Arc<BlogService>,
    database_id: Option<String>,
}

/// Build the API router
pub fn router(service: Arc<BlogService>, database_id: Option<String>) -> Router {
    let state = Arc::new(ServerState {
        service,
        database_id,
    });

    Router::new()
        .route("/api/blogs", get(list_blogs))
        .route("/api/blog/:id", get(get_blog))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &NotionBlog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog.service.clone(), blog.config.notion.database_id.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn status_for(error: &BlogError) -> StatusCode {
    match error.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
        ErrorKind::Connection => StatusCode::BAD_GATEWAY,
        ErrorKind::Source => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /api/blogs
async fn list_blogs(
    State(state): State<Arc<ServerState>>,
    Query(filter): Query<PostFilter>,
) -> Response {
    let Some(database_id) = state.database_id.as_deref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Database configuration missing",
                "message": "NOTION_DATABASE_ID environment variable is not set",
                "help": "Get your database ID from the Notion URL and set NOTION_DATABASE_ID",
            })),
        )
            .into_response();
    };

    match state.service.list_posts(database_id).await {
        Ok(posts) => Json(filter.apply(posts)).into_response(),
        Err(e) => {
            tracing::error!("Error in /api/blogs: {}", e);
            (
                status_for(&e),
                Json(json!({
                    "error": "Failed to fetch blogs",
                    "message": e.to_string(),
                    "kind": e.kind(),
                    "help": e.help(),
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/blog/:id
async fn get_blog(State(state): State<Arc<ServerState>>, Path(id): Path<String>) -> Response {
    tracing::info!("Fetching blog with ID: {}", id);

    match state.service.get_post_with_content(&id).await {
        Ok(post) => Json(post).into_response(),
        Err(e) => {
            tracing::error!("Error in /api/blog/{}: {}", id, e);
            (
                status_for(&e),
                Json(json!({
                    "error": "Blog post not found",
                    "details": e.to_string(),
                    "kind": e.kind(),
                    "id": id,
                    "help": e.help(),
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/health
async fn health(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    match state.service.test_connection().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => (
            status_for(&e),
            Json(json!({ "status": "error", "message": e.to_string() })),
        ),
    }
}
