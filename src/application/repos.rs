//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::{PostDraft, PostRecord, PostSummary};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Read side of the post store.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Every stored post, markdown bodies included.
    async fn list_all(&self) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;

    /// Slug, title, and author reference only.
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError>;
}

/// Write side of the post store. Uniqueness and existence are enforced by
/// the store itself; callers see the outcome as a `RepoError`.
#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, draft: PostDraft) -> Result<PostRecord, RepoError>;

    /// Replaces the post identified by the pre-edit `slug`. The draft may
    /// carry a different slug, renaming the post.
    async fn update_post(&self, slug: &str, draft: PostDraft) -> Result<PostRecord, RepoError>;

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError>;
}

/// Liveness probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
