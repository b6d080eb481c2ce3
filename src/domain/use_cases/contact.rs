use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::contact::{ContactMessageResponse, NewContactMessage},
    errors::AppError,
    gateways::email::EmailRelay,
};

pub struct ContactHandler<R>
where
    R: EmailRelay,
{
    pub email_relay: R,
}

impl<R> ContactHandler<R>
where
    R: EmailRelay,
{
    pub fn new(email_relay: R) -> Self {
        ContactHandler { email_relay }
    }

    /// Validates a contact form and forwards it to the email relay. The
    /// returned id is a submission receipt, not a stored record.
    pub async fn create_contact_message(
        &self,
        request: NewContactMessage,
    ) -> Result<ContactMessageResponse, AppError> {
        request.validate()?;

        self.email_relay.send_contact_message(&request).await?;

        Ok(ContactMessageResponse {
            message: "Your message has been sent.".to_string(),
            id: Uuid::new_v4(),
        })
    }
}
