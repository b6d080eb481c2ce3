use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

use crate::{
    AppState,
    constants::{MAX_PER_PAGE, MAX_RECENT_LIMIT},
    errors::AppError,
};

#[instrument(skip(state, query))]
pub async fn get_all_blog_posts(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let page = query.get("page").and_then(|v| v.parse::<u32>().ok()).unwrap_or(1);
    let per_page = query
        .get("per_page")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10)
        .min(MAX_PER_PAGE);

    let posts = state.content_handler.list_blog_posts(page, per_page).await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state, query))]
pub async fn get_recent_blog_posts(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let limit = query
        .get("limit")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(5)
        .min(MAX_RECENT_LIMIT);

    let posts = state.content_handler.recent_blog_posts(limit).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// `?image=N` positions the detail carousel; out-of-range indices wrap.
#[instrument(skip(slug, state, query))]
pub async fn get_blog_post_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let image_index = query.get("image").and_then(|v| v.parse::<usize>().ok());

    let post = state
        .content_handler
        .get_blog_post_by_slug(&slug, image_index)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}
