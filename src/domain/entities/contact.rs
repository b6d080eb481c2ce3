use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Contact form payload as submitted by the site's contact section.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewContactMessage {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 100))]
    pub company: Option<String>,

    #[validate(length(min = 2, max = 150))]
    pub subject: String,

    #[validate(length(min = 5, max = 2000))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactMessageResponse {
    pub message: String,
    pub id: Uuid,
}
