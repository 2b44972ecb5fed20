//! REST tool catalog and invoker: seven narrow tools, each mapping to one
//! HTTP endpoint on the mock backend.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::agent::ToolTransport;
use crate::error::AppError;
use crate::tools::definition::{CallMetadata, ToolCall, ToolDefinition, ToolInvocation};

pub struct RestTransport {
    client: reqwest::Client,
    base_url: String,
    catalog: Vec<ToolDefinition>,
}

impl RestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            catalog: catalog(),
        }
    }
}

#[async_trait]
impl ToolTransport for RestTransport {
    fn label(&self) -> &'static str {
        "REST"
    }

    fn catalog(&self) -> &[ToolDefinition] {
        &self.catalog
    }

    async fn invoke(&self, call: &ToolCall) -> Result<ToolInvocation, AppError> {
        let request = RestRequest::from_call(call)?;
        let method = request.method();
        let path = request.path();

        let mut req = self
            .client
            .request(method.clone(), format!("{}{}", self.base_url, path));
        if let Some(body) = request.body() {
            req = req.json(&body);
        }

        let payload = req.send().await?.text().await?;

        Ok(ToolInvocation {
            payload,
            metadata: CallMetadata::Http {
                method: method.to_string(),
                path,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdArgs {
    user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostIdArgs {
    post_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentIdArgs {
    comment_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommentArgs {
    post_id: String,
    author_id: String,
    content: String,
}

/// A validated tool call: one variant per tool name, carrying its typed
/// input. Unknown names and malformed inputs are rejected here, before
/// anything reaches the wire.
#[derive(Debug)]
enum RestRequest {
    GetUser(IdArgs),
    GetUserPosts(UserIdArgs),
    GetPost(IdArgs),
    GetPostAuthor(PostIdArgs),
    GetPostComments(PostIdArgs),
    GetCommentAuthor(CommentIdArgs),
    CreateComment(CreateCommentArgs),
}

impl RestRequest {
    fn from_call(call: &ToolCall) -> Result<Self, AppError> {
        match call.name.as_str() {
            "get_user" => Ok(Self::GetUser(parse_input(call)?)),
            "get_user_posts" => Ok(Self::GetUserPosts(parse_input(call)?)),
            "get_post" => Ok(Self::GetPost(parse_input(call)?)),
            "get_post_author" => Ok(Self::GetPostAuthor(parse_input(call)?)),
            "get_post_comments" => Ok(Self::GetPostComments(parse_input(call)?)),
            "get_comment_author" => Ok(Self::GetCommentAuthor(parse_input(call)?)),
            "create_comment" => Ok(Self::CreateComment(parse_input(call)?)),
            other => Err(AppError::UnknownTool(other.to_string())),
        }
    }

    fn method(&self) -> Method {
        match self {
            Self::CreateComment(_) => Method::POST,
            _ => Method::GET,
        }
    }

    fn path(&self) -> String {
        match self {
            Self::GetUser(args) => format!("/rest/users/{}", args.id),
            Self::GetUserPosts(args) => format!("/rest/users/{}/posts", args.user_id),
            Self::GetPost(args) => format!("/rest/posts/{}", args.id),
            Self::GetPostAuthor(args) => format!("/rest/posts/{}/author", args.post_id),
            Self::GetPostComments(args) => format!("/rest/posts/{}/comments", args.post_id),
            Self::GetCommentAuthor(args) => format!("/rest/comments/{}/author", args.comment_id),
            Self::CreateComment(_) => "/rest/comments".to_string(),
        }
    }

    fn body(&self) -> Option<serde_json::Value> {
        match self {
            Self::CreateComment(args) => serde_json::to_value(args).ok(),
            _ => None,
        }
    }
}

fn parse_input<T: DeserializeOwned>(call: &ToolCall) -> Result<T, AppError> {
    serde_json::from_value(call.input.clone()).map_err(|e| AppError::InvalidToolInput {
        tool: call.name.clone(),
        reason: e.to_string(),
    })
}

fn catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "get_user".to_string(),
            description: "Get a user by their ID. Returns user information including id, name, and email."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "The ID of the user to retrieve"
                    }
                },
                "required": ["id"]
            }),
        },
        ToolDefinition {
            name: "get_user_posts".to_string(),
            description: "Get all posts created by a specific user.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "userId": {
                        "type": "string",
                        "description": "The ID of the user whose posts to retrieve"
                    }
                },
                "required": ["userId"]
            }),
        },
        ToolDefinition {
            name: "get_post".to_string(),
            description: "Get a post by its ID. Returns post information including id, title, content, authorId, and likes."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "The ID of the post to retrieve"
                    }
                },
                "required": ["id"]
            }),
        },
        ToolDefinition {
            name: "get_post_author".to_string(),
            description: "Get the author of a specific post.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "postId": {
                        "type": "string",
                        "description": "The ID of the post whose author to retrieve"
                    }
                },
                "required": ["postId"]
            }),
        },
        ToolDefinition {
            name: "get_post_comments".to_string(),
            description: "Get all comments on a specific post.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "postId": {
                        "type": "string",
                        "description": "The ID of the post whose comments to retrieve"
                    }
                },
                "required": ["postId"]
            }),
        },
        ToolDefinition {
            name: "get_comment_author".to_string(),
            description: "Get the author of a specific comment.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "commentId": {
                        "type": "string",
                        "description": "The ID of the comment whose author to retrieve"
                    }
                },
                "required": ["commentId"]
            }),
        },
        ToolDefinition {
            name: "create_comment".to_string(),
            description: "Create a new comment on a post.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "postId": {
                        "type": "string",
                        "description": "The ID of the post to comment on"
                    },
                    "authorId": {
                        "type": "string",
                        "description": "The ID of the user creating the comment"
                    },
                    "content": {
                        "type": "string",
                        "description": "The content of the comment"
                    }
                },
                "required": ["postId", "authorId", "content"]
            }),
        },
    ]
}
