use actix_web::{HttpResponse, Responder, get, web};
use tracing::instrument;

use crate::{AppState, errors::AppError};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio content API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/v1/portfolio",
            "/api/v1/projects",
            "/api/v1/blog/posts",
            "/api/v1/skills",
            "/api/v1/contact",
            "/api/v1/health"
        ]
    }))
}

/// Single round-trip payload for the landing page.
#[instrument(skip(state))]
pub async fn get_portfolio_overview(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let overview = state.content_handler.portfolio_overview().await?;
    Ok(HttpResponse::Ok().json(overview))
}
