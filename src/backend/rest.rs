//! REST route handlers over the mock store.
//!
//! Absence and validation failures are reported as an in-body
//! `{error, status}` payload under HTTP 200, so every tool result the model
//! receives is a JSON body of uniform shape. The GraphQL side reports
//! absence through its errors channel instead; the asymmetry is part of
//! what the comparison demonstrates.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::backend::BackendState;

pub async fn get_user(State(state): State<BackendState>, Path(id): Path<String>) -> Json<Value> {
    match state.store.user(&id) {
        Some(user) => ok(user),
        None => error_body("User not found", 404),
    }
}

pub async fn get_user_posts(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Json<Value> {
    if state.store.user(&id).is_none() {
        return error_body("User not found", 404);
    }
    ok(state.store.posts_by_author(&id))
}

pub async fn get_post(State(state): State<BackendState>, Path(id): Path<String>) -> Json<Value> {
    match state.store.post(&id) {
        Some(post) => ok(post),
        None => error_body("Post not found", 404),
    }
}

pub async fn get_post_author(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Json<Value> {
    let Some(post) = state.store.post(&id) else {
        return error_body("Post not found", 404);
    };
    match state.store.user(&post.author_id) {
        Some(author) => ok(author),
        None => error_body("Author not found", 404),
    }
}

pub async fn get_post_comments(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Json<Value> {
    if state.store.post(&id).is_none() {
        return error_body("Post not found", 404);
    }
    ok(state.store.comments_for_post(&id))
}

pub async fn get_comment(State(state): State<BackendState>, Path(id): Path<String>) -> Json<Value> {
    match state.store.comment(&id) {
        Some(comment) => ok(comment),
        None => error_body("Comment not found", 404),
    }
}

pub async fn get_comment_author(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Json<Value> {
    let Some(comment) = state.store.comment(&id) else {
        return error_body("Comment not found", 404);
    };
    match state.store.user(&comment.author_id) {
        Some(author) => ok(author),
        None => error_body("Author not found", 404),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCommentBody {
    post_id: Option<String>,
    author_id: Option<String>,
    content: Option<String>,
}

pub async fn create_comment(
    State(state): State<BackendState>,
    Json(body): Json<CreateCommentBody>,
) -> Json<Value> {
    let (Some(post_id), Some(author_id), Some(content)) =
        (body.post_id, body.author_id, body.content)
    else {
        return error_body("Missing required fields", 400);
    };

    if state.store.post(&post_id).is_none() {
        return error_body("Post not found", 404);
    }
    if state.store.user(&author_id).is_none() {
        return error_body("Author not found", 404);
    }

    ok(state.store.create_comment(&post_id, &author_id, &content))
}

fn ok<T: Serialize>(value: T) -> Json<Value> {
    Json(serde_json::to_value(value).unwrap_or(Value::Null))
}

fn error_body(message: &str, status: u16) -> Json<Value> {
    Json(json!({ "error": message, "status": status }))
}
