//! GraphQL tool catalog and invoker: a single tool whose description embeds
//! the entire schema, accepting an arbitrary query or mutation string.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::agent::ToolTransport;
use crate::error::AppError;
use crate::tools::definition::{CallMetadata, ToolCall, ToolDefinition, ToolInvocation};

pub const TOOL_NAME: &str = "graphql_query";

/// The schema text shipped to the model. Field-level descriptions are what
/// steer it toward precise, appropriately nested queries.
pub const SCHEMA_SDL: &str = r#"type Query {
  """Get a user by ID"""
  user(id: ID!): User

  """Get a post by ID"""
  post(id: ID!): Post

  """Get all users"""
  users: [User!]!

  """Get all posts"""
  posts: [Post!]!
}

type Mutation {
  """Create a new comment on a post"""
  createComment(postId: ID!, authorId: ID!, content: String!): Comment
}

"""A user in the system"""
type User {
  """Unique identifier for the user"""
  id: ID!

  """User's full name"""
  name: String!

  """User's email address"""
  email: String!

  """All posts created by this user"""
  posts: [Post!]!
}

"""A blog post"""
type Post {
  """Unique identifier for the post"""
  id: ID!

  """Title of the post"""
  title: String!

  """Content/body of the post"""
  content: String!

  """The user who created this post"""
  author: User!

  """All comments on this post"""
  comments: [Comment!]!

  """Number of likes on this post"""
  likes: Int!
}

"""A comment on a post"""
type Comment {
  """Unique identifier for the comment"""
  id: ID!

  """Content of the comment"""
  content: String!

  """The user who created this comment"""
  author: User!

  """The post this comment belongs to"""
  post: Post!

  """When the comment was created"""
  createdAt: String!
}"#;

const NESTING_HINT: &str = r#"You can fetch nested data in a single query. For example:
- Get a user with all their posts: query { user(id: "1") { id name posts { title } } }
- Get a post with author and comments: query { post(id: "1") { title author { name } comments { content author { name } } } }
- Create a comment: mutation { createComment(postId: "1", authorId: "2", content: "Great post!") { id content createdAt } }"#;

pub struct GraphqlTransport {
    client: reqwest::Client,
    endpoint: String,
    catalog: Vec<ToolDefinition>,
}

impl GraphqlTransport {
    pub fn new(base_url: impl Into<String>, nesting_hint: bool) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{base}/graphql"),
            catalog: vec![query_tool(nesting_hint)],
        }
    }
}

#[async_trait]
impl ToolTransport for GraphqlTransport {
    fn label(&self) -> &'static str {
        "GraphQL"
    }

    fn catalog(&self) -> &[ToolDefinition] {
        &self.catalog
    }

    async fn invoke(&self, call: &ToolCall) -> Result<ToolInvocation, AppError> {
        if call.name != TOOL_NAME {
            return Err(AppError::UnknownTool(call.name.clone()));
        }
        let args: QueryArgs =
            serde_json::from_value(call.input.clone()).map_err(|e| AppError::InvalidToolInput {
                tool: call.name.clone(),
                reason: e.to_string(),
            })?;

        let payload = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": args.query }))
            .send()
            .await?
            .text()
            .await?;

        Ok(ToolInvocation {
            payload,
            metadata: CallMetadata::Graphql { query: args.query },
        })
    }
}

#[derive(Debug, Deserialize)]
struct QueryArgs {
    query: String,
}

fn query_tool(nesting_hint: bool) -> ToolDefinition {
    let hint = if nesting_hint {
        format!("\n{NESTING_HINT}\n")
    } else {
        String::new()
    };

    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: format!(
            "Execute a GraphQL query or mutation against the API. \
             The API supports the following schema:\n\n{SCHEMA_SDL}\n{hint}\n\
             Use nested queries to fetch related data efficiently in a single request."
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The GraphQL query or mutation to execute. Can include nested fields to fetch related data."
                }
            },
            "required": ["query"]
        }),
    }
}
