use std::sync::Arc;

mod domain;
mod infrastructure;
mod interfaces;
pub mod background_task;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{carousel, entities, normalize, read_time, use_cases};
pub use infrastructure::{cms, utils};
pub use interfaces::{gateways, handlers, routes};

use cms::image_url::SanityImageResolver;
use gateways::{email::EmailJsRelay, sanity::SanityGateway};
use normalize::{Normalizer, NormalizerMetrics};
use use_cases::{contact::ContactHandler, content::ContentHandler};

pub struct AppState {
    pub content_handler: AppContentHandler,
    pub contact_handler: AppContactHandler,
    pub metrics: Arc<NormalizerMetrics>,
    pub trust_proxy_headers: bool,
}

pub type AppContentHandler = ContentHandler<SanityGateway>;
pub type AppContactHandler = ContactHandler<EmailJsRelay>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Self {
        let metrics = Arc::new(NormalizerMetrics::default());
        let resolver = Arc::new(SanityImageResolver::new(config));
        let normalizer = Normalizer::new(resolver, metrics.clone());

        let content_handler = ContentHandler::new(
            SanityGateway::new(config),
            normalizer,
            config.words_per_minute,
        );
        let contact_handler = ContactHandler::new(EmailJsRelay::new(config));

        AppState {
            content_handler,
            contact_handler,
            metrics,
            trust_proxy_headers: config.trust_proxy_headers,
        }
    }
}
