use async_trait::async_trait;
use mockall::automock;
use serde_json::json;

use crate::{entities::contact::NewContactMessage, errors::AppError, settings::AppConfig};

/// Outbound capability to the third-party email-relay service.
#[automock]
#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send_contact_message(&self, form: &NewContactMessage) -> Result<(), AppError>;
}

/// EmailJS-style relay: one POST per submission, with the form fields as
/// template parameters.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    http: reqwest::Client,
    send_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsRelay {
    pub fn new(config: &AppConfig) -> Self {
        EmailJsRelay {
            http: reqwest::Client::new(),
            send_url: config.email_send_url.clone(),
            service_id: config.email_service_id.clone(),
            template_id: config.email_template_id.clone(),
            public_key: config.email_public_key.clone(),
        }
    }
}

#[async_trait]
impl EmailRelay for EmailJsRelay {
    async fn send_contact_message(&self, form: &NewContactMessage) -> Result<(), AppError> {
        let payload = json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.public_key,
            "template_params": {
                "name": form.name,
                "email": form.email,
                "phone": form.phone,
                "company": form.company,
                "subject": form.subject,
                "message": form.message,
            }
        });

        let response = self.http.post(&self.send_url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BadGateway(format!(
                "Email relay rejected the message ({}): {}",
                status, body
            )));
        }

        Ok(())
    }
}
