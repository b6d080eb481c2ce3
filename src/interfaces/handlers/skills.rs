use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

use crate::{AppState, errors::AppError};

#[instrument(skip(state))]
pub async fn get_all_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.content_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}
