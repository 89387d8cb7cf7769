use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::error;

use quill_db::BLOG_ROOT;

use crate::state::AppState;
use crate::templates::{FrontTemplate, PermalinkTemplate, PostFormTemplate, PostView};

/// The front page shows this many posts, newest first.
const FRONT_PAGE_LIMIT: u32 = 10;

const MISSING_FIELDS: &str = "You must enter both a subject and content";

#[derive(Debug, Deserialize)]
pub struct NewPostForm {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
}

pub async fn front_page(State(state): State<AppState>) -> Result<FrontTemplate, StatusCode> {
    let rows = state
        .db
        .recent_posts(BLOG_ROOT, FRONT_PAGE_LIMIT)
        .map_err(|e| {
            error!("listing posts failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(FrontTemplate {
        posts: rows.into_iter().map(PostView::from).collect(),
    })
}

pub async fn new_post_form() -> PostFormTemplate {
    PostFormTemplate::empty()
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<NewPostForm>,
) -> Result<Response, StatusCode> {
    if form.subject.is_empty() || form.content.is_empty() {
        // Echo what was typed so nothing is lost.
        return Ok(PostFormTemplate {
            subject: form.subject,
            content: form.content,
            error: Some(MISSING_FIELDS),
        }
        .into_response());
    }

    let id = state
        .db
        .create_post(BLOG_ROOT, &form.subject, &form.content)
        .map_err(|e| {
            error!("creating post failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Redirect::to(&format!("/{id}")).into_response())
}

pub async fn permalink(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<PermalinkTemplate, StatusCode> {
    // The route pattern catches every single-segment path; only numeric
    // ids name posts, anything else is a miss.
    let id: i64 = id.parse().map_err(|_| StatusCode::NOT_FOUND)?;

    let row = state
        .db
        .get_post(BLOG_ROOT, id)
        .map_err(|e| {
            error!("loading post {id} failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(PermalinkTemplate { post: row.into() })
}
