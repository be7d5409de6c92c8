//! Post mutation and query workflow behind the admin surface.

use std::sync::Arc;

use thiserror::Error;

use crate::application::repos::{PostsRepo, PostsWriteRepo, RepoError};
use crate::domain::posts::{FieldErrors, PostDraft, PostDraftInput, PostRecord, PostSummary};

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error("one or more post fields are missing")]
    Validation(FieldErrors),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct AdminPostService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
}

impl AdminPostService {
    pub fn new(reader: Arc<dyn PostsRepo>, writer: Arc<dyn PostsWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        self.reader.list_summaries().await
    }

    pub async fn list_all(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.reader.list_all().await
    }

    pub async fn load_post(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        self.reader.find_by_slug(slug).await
    }

    /// Validate and persist a new post. No store call is made when any
    /// field is missing.
    pub async fn create_post(&self, input: PostDraftInput) -> Result<PostRecord, AdminPostError> {
        let draft = PostDraft::validate(input).map_err(AdminPostError::Validation)?;
        Ok(self.writer.create_post(draft).await?)
    }

    /// Validate and replace the post identified by the pre-edit
    /// `route_slug`. The submitted slug may differ, renaming the post.
    pub async fn update_post(
        &self,
        route_slug: &str,
        input: PostDraftInput,
    ) -> Result<PostRecord, AdminPostError> {
        let draft = PostDraft::validate(input).map_err(AdminPostError::Validation)?;
        Ok(self.writer.update_post(route_slug, draft).await?)
    }

    /// Delete by slug. No existence pre-check; a missing post surfaces as
    /// the store's not-found error.
    pub async fn delete_post(&self, route_slug: &str) -> Result<(), AdminPostError> {
        Ok(self.writer.delete_post(route_slug).await?)
    }
}
