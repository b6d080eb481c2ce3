use actix_web::{HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode, web};
use serde_json::json;

/// Rewrites body-deserialization failures into the same JSON error shape
/// the rest of the API uses.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| JsonError::from(err).into()),
    );
}

#[derive(Debug)]
pub struct JsonError {
    message: String,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        JsonError {
            message: format!("JSON payload error: {}", err),
        }
    }
}
