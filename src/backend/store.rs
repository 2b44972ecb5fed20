//! In-memory mock data store: fixed users and posts, append-only comments.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const SEED_JSON: &str = include_str!("../../assets/seed.json");

/// A user in the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,
    /// User's full name
    pub name: String,
    /// User's email address
    pub email: String,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Post {
    /// Unique identifier for the post
    pub id: String,
    /// Title of the post
    pub title: String,
    /// Content/body of the post
    pub content: String,
    #[graphql(skip)]
    pub author_id: String,
    /// Number of likes on this post
    pub likes: i32,
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Comment {
    /// Unique identifier for the comment
    pub id: String,
    /// Content of the comment
    pub content: String,
    #[graphql(skip)]
    pub post_id: String,
    #[graphql(skip)]
    pub author_id: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SeedData {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// Users and posts are immutable after seeding; comments grow behind the
/// lock. Comment ids come from a monotonic counter, never from collection
/// length, so concurrent writers cannot collide.
#[derive(Debug)]
pub struct MockStore {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: RwLock<Vec<Comment>>,
    next_comment_id: AtomicU64,
}

impl MockStore {
    pub fn seeded() -> Result<Self, AppError> {
        let seed: SeedData = serde_json::from_str(SEED_JSON)
            .map_err(|e| AppError::Message(format!("Invalid seed.json: {e}")))?;
        Self::from_seed(seed)
    }

    fn from_seed(seed: SeedData) -> Result<Self, AppError> {
        let user_ids: HashSet<&str> = seed.users.iter().map(|u| u.id.as_str()).collect();
        if user_ids.len() != seed.users.len() {
            return Err(AppError::Message(
                "seed.json contains duplicate user ids".to_string(),
            ));
        }
        let post_ids: HashSet<&str> = seed.posts.iter().map(|p| p.id.as_str()).collect();
        if post_ids.len() != seed.posts.len() {
            return Err(AppError::Message(
                "seed.json contains duplicate post ids".to_string(),
            ));
        }
        for post in &seed.posts {
            if !user_ids.contains(post.author_id.as_str()) {
                return Err(AppError::Message(format!(
                    "seed.json post '{}' references unknown author '{}'",
                    post.id, post.author_id
                )));
            }
        }
        for comment in &seed.comments {
            if !post_ids.contains(comment.post_id.as_str()) {
                return Err(AppError::Message(format!(
                    "seed.json comment '{}' references unknown post '{}'",
                    comment.id, comment.post_id
                )));
            }
            if !user_ids.contains(comment.author_id.as_str()) {
                return Err(AppError::Message(format!(
                    "seed.json comment '{}' references unknown author '{}'",
                    comment.id, comment.author_id
                )));
            }
        }

        let next_comment_id = seed
            .comments
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        Ok(Self {
            users: seed.users,
            posts: seed.posts,
            comments: RwLock::new(seed.comments),
            next_comment_id: AtomicU64::new(next_comment_id),
        })
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn post(&self, id: &str) -> Option<Post> {
        self.posts.iter().find(|p| p.id == id).cloned()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.clone()
    }

    pub fn posts_by_author(&self, user_id: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.author_id == user_id)
            .cloned()
            .collect()
    }

    pub fn comment(&self, id: &str) -> Option<Comment> {
        self.comments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn comments_for_post(&self, post_id: &str) -> Vec<Comment> {
        self.comments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn create_comment(&self, post_id: &str, author_id: &str, content: &str) -> Comment {
        let id = self.next_comment_id.fetch_add(1, Ordering::Relaxed);
        let comment = Comment {
            id: id.to_string(),
            content: content.to_string(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            created_at: Utc::now(),
        };
        self.comments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(comment.clone());
        comment
    }
}
