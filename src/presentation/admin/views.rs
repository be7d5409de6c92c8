//! View models for the admin surface.

use askama::Template;

use crate::domain::posts::{FieldErrors, PostDraftInput, PostRecord, PostSummary};

#[derive(Clone)]
pub struct PostRowView {
    pub slug: String,
    pub title: String,
    pub author_id: String,
}

impl From<PostSummary> for PostRowView {
    fn from(summary: PostSummary) -> Self {
        Self {
            slug: summary.slug,
            title: summary.title,
            author_id: summary.author_id,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct PostListTemplate {
    pub rows: Vec<PostRowView>,
}

#[derive(Clone, Default)]
pub struct FieldErrorsView {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
    pub author_id: Option<&'static str>,
}

impl From<FieldErrors> for FieldErrorsView {
    fn from(errors: FieldErrors) -> Self {
        Self {
            title: errors.title,
            slug: errors.slug,
            markdown: errors.markdown,
            author_id: errors.author_id,
        }
    }
}

#[derive(Clone)]
pub struct PostEditorView {
    pub route_slug: String,
    pub is_new: bool,
    pub heading: String,
    pub title: String,
    pub slug: String,
    pub markdown: String,
    pub author_id: String,
    pub errors: FieldErrorsView,
}

impl PostEditorView {
    pub fn blank() -> Self {
        Self {
            route_slug: "new".to_string(),
            is_new: true,
            heading: "New post".to_string(),
            title: String::new(),
            slug: String::new(),
            markdown: String::new(),
            author_id: String::new(),
            errors: FieldErrorsView::default(),
        }
    }

    pub fn for_record(post: &PostRecord) -> Self {
        Self {
            route_slug: post.slug.clone(),
            is_new: false,
            heading: format!("Edit \"{}\"", post.title),
            title: post.title.clone(),
            slug: post.slug.clone(),
            markdown: post.markdown.clone(),
            author_id: post.author_id.clone(),
            errors: FieldErrorsView::default(),
        }
    }

    /// Re-render after a failed submission: the submitted values come back
    /// with one message per missing field.
    pub fn resubmitted(route_slug: &str, input: &PostDraftInput, errors: FieldErrors) -> Self {
        let is_new = route_slug == "new";
        Self {
            route_slug: route_slug.to_string(),
            is_new,
            heading: if is_new {
                "New post".to_string()
            } else {
                format!("Edit \"{route_slug}\"")
            },
            title: input.title.clone().unwrap_or_default(),
            slug: input.slug.clone().unwrap_or_default(),
            markdown: input.markdown.clone().unwrap_or_default(),
            author_id: input.author_id.clone().unwrap_or_default(),
            errors: errors.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/post_form.html")]
pub struct PostEditorTemplate {
    pub view: PostEditorView,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
}

impl ErrorPageView {
    pub fn post_not_found(slug: &str) -> Self {
        Self {
            title: "Post not found".to_string(),
            message: format!("The post \"{slug}\" does not exist."),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate {
    pub view: ErrorPageView,
}
