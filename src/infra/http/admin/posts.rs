//! Admin handlers for the post surface: listing, editor, write dispatch,
//! JSON export.

use axum::{
    Json,
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    application::{
        admin::posts::AdminPostError,
        error::{ErrorReport, HttpError},
    },
    infra::http::repo_error_to_http,
    presentation::{
        admin::views::{
            ErrorPageTemplate, ErrorPageView, PostEditorTemplate, PostEditorView,
            PostListTemplate, PostRowView,
        },
        views::render_template_response,
    },
};

use super::AdminState;
use super::forms::{AdminPostForm, MalformedIntent, PostWriteRequest};

/// Route parameter value that selects the blank editor instead of a lookup.
pub(crate) const NEW_POST_SENTINEL: &str = "new";

const LISTING_PATH: &str = "/posts";

pub(crate) async fn admin_posts(State(state): State<AdminState>) -> Response {
    let summaries = match state.posts.list_summaries().await {
        Ok(summaries) => summaries,
        Err(err) => return repo_error_to_http("infra::http::admin_posts", err).into_response(),
    };

    let rows = summaries.into_iter().map(PostRowView::from).collect();
    render_template_response(PostListTemplate { rows }, StatusCode::OK)
}

pub(crate) async fn admin_post_editor(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
) -> Response {
    if slug == NEW_POST_SENTINEL {
        return render_template_response(
            PostEditorTemplate {
                view: PostEditorView::blank(),
            },
            StatusCode::OK,
        );
    }

    match state.posts.load_post(&slug).await {
        Ok(Some(post)) => render_template_response(
            PostEditorTemplate {
                view: PostEditorView::for_record(&post),
            },
            StatusCode::OK,
        ),
        Ok(None) => post_not_found(&slug),
        Err(err) => repo_error_to_http("infra::http::admin_post_editor", err).into_response(),
    }
}

pub(crate) async fn admin_post_write(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    Form(form): Form<AdminPostForm>,
) -> Response {
    let request = match form.into_request() {
        Ok(request) => request,
        Err(MalformedIntent { got }) => {
            return HttpError::new(
                "infra::http::admin_post_write",
                StatusCode::BAD_REQUEST,
                "Unknown intent",
                match got {
                    Some(value) => format!("intent `{value}` is not delete, create, or update"),
                    None => "no intent supplied".to_string(),
                },
            )
            .into_response();
        }
    };

    match request {
        PostWriteRequest::Delete => match state.posts.delete_post(&slug).await {
            Ok(()) => Redirect::to(LISTING_PATH).into_response(),
            Err(AdminPostError::Repo(err)) => {
                repo_error_to_http("infra::http::admin_post_write", err).into_response()
            }
            Err(AdminPostError::Validation(_)) => unreachable!("delete does not validate fields"),
        },
        PostWriteRequest::Submit(input) => {
            let outcome = if slug == NEW_POST_SENTINEL {
                state.posts.create_post(input.clone()).await
            } else {
                state.posts.update_post(&slug, input.clone()).await
            };

            match outcome {
                Ok(_) => Redirect::to(LISTING_PATH).into_response(),
                Err(AdminPostError::Validation(errors)) => {
                    let view = PostEditorView::resubmitted(&slug, &input, errors);
                    let mut response = render_template_response(
                        PostEditorTemplate { view },
                        StatusCode::UNPROCESSABLE_ENTITY,
                    );
                    ErrorReport::from_message(
                        "infra::http::admin_post_write",
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "post submission is missing required fields",
                    )
                    .attach(&mut response);
                    response
                }
                Err(AdminPostError::Repo(err)) => {
                    repo_error_to_http("infra::http::admin_post_write", err).into_response()
                }
            }
        }
    }
}

pub(crate) async fn admin_export(State(state): State<AdminState>) -> Response {
    match state.posts.list_all().await {
        Ok(posts) => Json(posts).into_response(),
        Err(err) => repo_error_to_http("infra::http::admin_export", err).into_response(),
    }
}

fn post_not_found(slug: &str) -> Response {
    let mut response = render_template_response(
        ErrorPageTemplate {
            view: ErrorPageView::post_not_found(slug),
        },
        StatusCode::NOT_FOUND,
    );
    ErrorReport::from_message(
        "infra::http::admin_post_editor",
        StatusCode::NOT_FOUND,
        format!("post `{slug}` does not exist"),
    )
    .attach(&mut response);
    response
}
