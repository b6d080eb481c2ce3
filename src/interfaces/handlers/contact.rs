use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::instrument;

use crate::{AppState, entities::contact::NewContactMessage, errors::AppError};

/// Extracts the client IP, honoring X-Forwarded-For only when the
/// deployment says the proxy chain can be trusted.
fn client_ip(req: &HttpRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(forwarded) = req.headers().get("x-forwarded-for") {
            if let Ok(value) = forwarded.to_str() {
                if let Some(first) = value.split(',').next() {
                    return first.trim().to_string();
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[instrument(skip(req, state, form))]
pub async fn create_contact_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<NewContactMessage>,
) -> Result<impl Responder, AppError> {
    let ip = client_ip(&req, state.trust_proxy_headers);
    tracing::info!(client_ip = %ip, "Contact form submission received");

    let response = state
        .contact_handler
        .create_contact_message(form.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}
