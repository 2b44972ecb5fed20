//! GraphQL layer over the mock store: the resolvers compose the same
//! lookup/filter operations the REST handlers use, which is what lets one
//! nested query replace several REST round trips.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, EmptySubscription, Error, Object, Result, Schema};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::backend::store::{Comment, MockStore, Post, User};
use crate::backend::BackendState;

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: Arc<MockStore>) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

fn store<'a>(ctx: &Context<'a>) -> Result<&'a Arc<MockStore>> {
    ctx.data::<Arc<MockStore>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a user by ID
    async fn user(&self, ctx: &Context<'_>, id: String) -> Result<Option<User>> {
        Ok(store(ctx)?.user(&id))
    }

    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: String) -> Result<Option<Post>> {
        Ok(store(ctx)?.post(&id))
    }

    /// Get all users
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        Ok(store(ctx)?.users())
    }

    /// Get all posts
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        Ok(store(ctx)?.posts())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new comment on a post
    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        post_id: String,
        author_id: String,
        content: String,
    ) -> Result<Comment> {
        let store = store(ctx)?;
        if store.post(&post_id).is_none() {
            return Err(Error::new("Post not found"));
        }
        if store.user(&author_id).is_none() {
            return Err(Error::new("Author not found"));
        }
        Ok(store.create_comment(&post_id, &author_id, &content))
    }
}

#[ComplexObject]
impl User {
    /// All posts created by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        Ok(store(ctx)?.posts_by_author(&self.id))
    }
}

#[ComplexObject]
impl Post {
    /// The user who created this post
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        store(ctx)?
            .user(&self.author_id)
            .ok_or_else(|| Error::new("Author not found"))
    }

    /// All comments on this post
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        Ok(store(ctx)?.comments_for_post(&self.id))
    }
}

#[ComplexObject]
impl Comment {
    /// The user who created this comment
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        store(ctx)?
            .user(&self.author_id)
            .ok_or_else(|| Error::new("Author not found"))
    }

    /// The post this comment belongs to
    async fn post(&self, ctx: &Context<'_>) -> Result<Post> {
        store(ctx)?
            .post(&self.post_id)
            .ok_or_else(|| Error::new("Post not found"))
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
}

pub async fn graphql_handler(
    State(state): State<BackendState>,
    Json(request): Json<GraphqlRequest>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request.query.as_str()).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ApiSchema {
        build_schema(Arc::new(MockStore::seeded().unwrap()))
    }

    #[tokio::test]
    async fn user_query_resolves() {
        let response = schema()
            .execute(r#"query { user(id: "1") { id name email } }"#)
            .await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert_eq!(data["user"]["name"], "Alice Johnson");
        assert_eq!(data["user"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn nested_query_resolves_relations() {
        let response = schema()
            .execute(
                r#"query {
                    post(id: "5") {
                        title
                        likes
                        author { name }
                        comments { content author { name } }
                    }
                }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["post"]["likes"], 91);
        assert_eq!(data["post"]["author"]["name"], "Diana Prince");
        assert_eq!(data["post"]["comments"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn missing_post_is_null_not_error() {
        let response = schema()
            .execute(r#"query { post(id: "999") { id } }"#)
            .await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert!(data["post"].is_null());
    }

    #[tokio::test]
    async fn mutation_validates_references() {
        let response = schema()
            .execute(r#"mutation { createComment(postId: "999", authorId: "2", content: "x") { id } }"#)
            .await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Post not found");
    }

    #[tokio::test]
    async fn mutation_creates_a_visible_comment() {
        let store = Arc::new(MockStore::seeded().unwrap());
        let schema = build_schema(store.clone());

        let response = schema
            .execute(r#"mutation { createComment(postId: "1", authorId: "2", content: "Great post!") { id content createdAt } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["createComment"]["id"], "19");
        assert_eq!(data["createComment"]["content"], "Great post!");

        assert_eq!(store.comments_for_post("1").len(), 4);
    }
}
