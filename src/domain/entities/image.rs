use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resolved, renderable image reference.
///
/// `id` is stable across repeated normalization of the same record, but only
/// unique within one entity's image list. `url` is an absolute URL a display
/// surface can fetch directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub id: String,
    pub url: String,
}

/// Capability supplied by the content gateway: maps one raw image field to
/// an absolute URL string. Pure per entry; shapes the resolver does not
/// recognize fail rather than guess.
pub trait ResolveImageUrl: Send + Sync {
    fn resolve(&self, raw: &Value) -> Result<String, UnresolvableImageError>;
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum UnresolvableImageError {
    #[display("Unrecognized image field shape")]
    UnrecognizedShape,

    #[display("Malformed image asset reference: {_0}")]
    MalformedAssetRef(String),

    #[display("Image URL is not an absolute http(s) URL: {_0}")]
    InvalidUrl(String),

    #[display("Image entry carries no resolvable URL")]
    MissingUrl,
}
