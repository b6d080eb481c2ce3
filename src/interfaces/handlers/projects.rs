use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

use crate::{AppState, errors::AppError};

#[instrument(skip(state))]
pub async fn get_all_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.content_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// `?image=N` positions the detail carousel; out-of-range indices wrap.
#[instrument(skip(project_id, state, query))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let image_index = query.get("image").and_then(|v| v.parse::<usize>().ok());

    let project = state
        .content_handler
        .get_project_by_id(&project_id, image_index)
        .await?;

    Ok(HttpResponse::Ok().json(project))
}
