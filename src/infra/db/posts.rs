use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::application::repos::{PostsRepo, PostsWriteRepo, RepoError};
use crate::domain::posts::{PostDraft, PostRecord, PostSummary};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(Debug, FromRow)]
struct PostRow {
    slug: String,
    title: String,
    markdown: String,
    author_id: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
            markdown: row.markdown,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PostSummaryRow {
    slug: String,
    title: String,
    author_id: String,
}

impl From<PostSummaryRow> for PostSummary {
    fn from(row: PostSummaryRow) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
            author_id: row.author_id,
        }
    }
}

const POST_COLUMNS: &str = "slug, title, markdown, author_id, created_at, updated_at";

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_all(&self) -> Result<Vec<PostRecord>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY updated_at DESC, slug"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(
            "SELECT slug, title, author_id FROM posts ORDER BY updated_at DESC, slug",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostSummary::from).collect())
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, draft: PostDraft) -> Result<PostRecord, RepoError> {
        let PostDraft {
            slug,
            title,
            markdown,
            author_id,
        } = draft;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (slug, title, markdown, author_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(slug)
        .bind(title)
        .bind(markdown)
        .bind(author_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn update_post(&self, slug: &str, draft: PostDraft) -> Result<PostRecord, RepoError> {
        let PostDraft {
            slug: new_slug,
            title,
            markdown,
            author_id,
        } = draft;

        // fetch_one so an unknown pre-edit slug surfaces as RowNotFound.
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts \
             SET slug = $2, title = $3, markdown = $4, author_id = $5, updated_at = now() \
             WHERE slug = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(slug)
        .bind(new_slug)
        .bind(title)
        .bind(markdown)
        .bind(author_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        sqlx::query_as::<_, PostSummaryRow>(
            "DELETE FROM posts WHERE slug = $1 RETURNING slug, title, author_id",
        )
        .bind(slug)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
