use serde_json::Value;
use url::Url;

use crate::{
    entities::image::{ResolveImageUrl, UnresolvableImageError},
    settings::AppConfig,
};

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Resolves the image-field shapes that have appeared across record
/// revisions: a bare URL string, a pre-resolved `{asset: {url}}` object,
/// and an unresolved `{asset: {_ref}}` asset reference.
#[derive(Debug, Clone)]
pub struct SanityImageResolver {
    project_id: String,
    dataset: String,
}

impl SanityImageResolver {
    pub fn new(config: &AppConfig) -> Self {
        SanityImageResolver {
            project_id: config.content_project_id.clone(),
            dataset: config.content_dataset.clone(),
        }
    }

    /// Rewrites an `image-<assetId>-<dims>-<ext>` reference to its CDN URL.
    fn resolve_asset_ref(&self, asset_ref: &str) -> Result<String, UnresolvableImageError> {
        let malformed = || UnresolvableImageError::MalformedAssetRef(asset_ref.to_string());

        let rest = asset_ref.strip_prefix("image-").ok_or_else(malformed)?;
        let (name, extension) = rest.rsplit_once('-').ok_or_else(malformed)?;
        if name.is_empty() || extension.is_empty() {
            return Err(malformed());
        }

        Ok(format!(
            "{CDN_BASE}/{}/{}/{}.{}",
            self.project_id, self.dataset, name, extension
        ))
    }
}

fn validated_absolute(raw_url: &str) -> Result<String, UnresolvableImageError> {
    match Url::parse(raw_url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            Ok(raw_url.to_string())
        }
        _ => Err(UnresolvableImageError::InvalidUrl(raw_url.to_string())),
    }
}

impl ResolveImageUrl for SanityImageResolver {
    fn resolve(&self, raw: &Value) -> Result<String, UnresolvableImageError> {
        match raw {
            Value::String(url) => validated_absolute(url),
            Value::Object(_) => {
                if let Some(url) = raw.pointer("/asset/url").and_then(Value::as_str) {
                    return validated_absolute(url);
                }
                if let Some(asset_ref) = raw.pointer("/asset/_ref").and_then(Value::as_str) {
                    return self.resolve_asset_ref(asset_ref);
                }
                Err(UnresolvableImageError::MissingUrl)
            }
            _ => Err(UnresolvableImageError::UnrecognizedShape),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolver() -> SanityImageResolver {
        SanityImageResolver {
            project_id: "5zy63g6k".to_string(),
            dataset: "my-portfolio".to_string(),
        }
    }

    #[test]
    fn bare_string_url_passes_through() {
        let url = resolver().resolve(&json!("https://x/1.png")).unwrap();
        assert_eq!(url, "https://x/1.png");
    }

    #[test]
    fn relative_string_url_is_rejected() {
        let err = resolver().resolve(&json!("/uploads/1.png")).unwrap_err();
        assert_eq!(
            err,
            UnresolvableImageError::InvalidUrl("/uploads/1.png".to_string())
        );
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert!(resolver().resolve(&json!("ftp://x/1.png")).is_err());
    }

    #[test]
    fn pre_resolved_asset_url_passes_through() {
        let raw = json!({"asset": {"url": "https://cdn.sanity.io/images/p/d/abc-10x10.png"}});
        let url = resolver().resolve(&raw).unwrap();
        assert_eq!(url, "https://cdn.sanity.io/images/p/d/abc-10x10.png");
    }

    #[test]
    fn asset_reference_is_rewritten_to_cdn_url() {
        let raw = json!({
            "_type": "image",
            "asset": {"_ref": "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg", "_type": "reference"}
        });
        let url = resolver().resolve(&raw).unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/5zy63g6k/my-portfolio/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
        );
    }

    #[test]
    fn non_image_asset_reference_is_malformed() {
        let raw = json!({"asset": {"_ref": "file-abc123-pdf"}});
        assert!(matches!(
            resolver().resolve(&raw),
            Err(UnresolvableImageError::MalformedAssetRef(_))
        ));
    }

    #[test]
    fn object_without_asset_has_no_url() {
        let raw = json!({"hotspot": {"x": 0.5}});
        assert_eq!(
            resolver().resolve(&raw),
            Err(UnresolvableImageError::MissingUrl)
        );
    }

    #[test]
    fn scalar_shapes_are_unrecognized() {
        assert_eq!(
            resolver().resolve(&json!(42)),
            Err(UnresolvableImageError::UnrecognizedShape)
        );
        assert_eq!(
            resolver().resolve(&json!(null)),
            Err(UnresolvableImageError::UnrecognizedShape)
        );
    }
}
