//! The mock backend process: one axum router exposing the REST routes and
//! the GraphQL endpoint over the same store.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::error::AppError;

pub mod graphql;
pub mod rest;
pub mod store;

use graphql::ApiSchema;
use store::MockStore;

#[derive(Clone)]
pub struct BackendState {
    pub store: Arc<MockStore>,
    pub schema: ApiSchema,
}

pub fn router(store: Arc<MockStore>) -> Router {
    let schema = graphql::build_schema(store.clone());
    let state = BackendState { store, schema };

    Router::new()
        .route("/", get(index))
        .route("/graphql", post(graphql::graphql_handler))
        .route("/rest/users/{id}", get(rest::get_user))
        .route("/rest/users/{id}/posts", get(rest::get_user_posts))
        .route("/rest/posts/{id}", get(rest::get_post))
        .route("/rest/posts/{id}/author", get(rest::get_post_author))
        .route("/rest/posts/{id}/comments", get(rest::get_post_comments))
        .route("/rest/comments/{id}", get(rest::get_comment))
        .route("/rest/comments/{id}/author", get(rest::get_comment_author))
        .route("/rest/comments", post(rest::create_comment))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "GraphQL vs REST Demo Server",
        "endpoints": {
            "graphql": "/graphql",
            "rest": {
                "users": "/rest/users/{id}",
                "userPosts": "/rest/users/{id}/posts",
                "posts": "/rest/posts/{id}",
                "postAuthor": "/rest/posts/{id}/author",
                "postComments": "/rest/posts/{id}/comments",
                "comments": "/rest/comments/{id}",
                "commentAuthor": "/rest/comments/{id}/author",
                "createComment": "POST /rest/comments"
            }
        }
    }))
}

/// Serve on a fixed address until the process exits.
pub async fn serve(addr: SocketAddr, store: Arc<MockStore>) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("mock backend listening on http://{addr}");
    tracing::info!("GraphQL endpoint: http://{addr}/graphql");
    tracing::info!("REST endpoints:  http://{addr}/rest/*");
    axum::serve(listener, router(store)).await?;
    Ok(())
}

/// Bind an ephemeral localhost port and serve in a background task. Used by
/// the comparison driver and the integration tests.
pub async fn spawn_ephemeral(store: Arc<MockStore>) -> Result<(SocketAddr, JoinHandle<()>), AppError> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    let app = router(store);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("mock backend stopped: {e}");
        }
    });
    tracing::debug!("mock backend spawned on http://{addr}");
    Ok((addr, handle))
}
