use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::Serialize;
use serde_json::Value;

use crate::entities::{
    blog_post::BlogPost,
    image::{ImageDescriptor, ResolveImageUrl},
    project::Project,
    skill::Skill,
};

/// Counters for events the normalizer swallows by policy. Exposed through
/// the health endpoint and the periodic report task.
#[derive(Debug, Default)]
pub struct NormalizerMetrics {
    images_dropped: AtomicU64,
    records_skipped: AtomicU64,
}

impl NormalizerMetrics {
    pub fn record_image_dropped(&self) {
        self.images_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.records_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn images_dropped(&self) -> u64 {
        self.images_dropped.load(Ordering::Relaxed)
    }

    pub fn records_skipped(&self) -> u64 {
        self.records_skipped.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            images_dropped: self.images_dropped(),
            records_skipped: self.records_skipped(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub images_dropped: u64,
    pub records_skipped: u64,
}

/// A raw record that cannot be turned into a canonical entity. Fatal for
/// that single record only; collection callers skip and continue.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum NormalizeError {
    #[display("{record} record is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[display("{record} record field `{field}` has an unexpected type or value")]
    InvalidField {
        record: &'static str,
        field: &'static str,
    },
}

/// Converts heterogeneous raw content-store records into canonical
/// entities. One instance serves the whole app; it holds no per-record
/// state, so identical input always yields identical output.
#[derive(Clone)]
pub struct Normalizer {
    resolver: Arc<dyn ResolveImageUrl>,
    metrics: Arc<NormalizerMetrics>,
}

impl Normalizer {
    pub fn new(resolver: Arc<dyn ResolveImageUrl>, metrics: Arc<NormalizerMetrics>) -> Self {
        Normalizer { resolver, metrics }
    }

    pub fn metrics(&self) -> &NormalizerMetrics {
        &self.metrics
    }

    pub fn normalize_project(&self, raw: &Value) -> Result<Project, NormalizeError> {
        const RECORD: &str = "project";

        let id = require_str(raw, RECORD, "_id")?;
        let title = require_str(raw, RECORD, "title")?;
        let description = require_str(raw, RECORD, "description")?;
        let images = self.resolve_images(raw.get("images"), &id);

        Ok(Project {
            id,
            title,
            description,
            images,
            github_link: optional_str(raw, "githubLink"),
            live_link: optional_str(raw, "liveLink"),
            technologies: string_seq(raw, "technologies"),
            features: string_seq(raw, "features"),
            challenges: string_seq(raw, "challenges"),
            learnings: string_seq(raw, "learnings"),
        })
    }

    pub fn normalize_blog_post(&self, raw: &Value) -> Result<BlogPost, NormalizeError> {
        const RECORD: &str = "blog";

        let id = require_str(raw, RECORD, "_id")?;
        let title = require_str(raw, RECORD, "title")?;
        let description = require_str(raw, RECORD, "description")?;
        let content = require_str(raw, RECORD, "content")?;
        let author = require_str(raw, RECORD, "author")?;
        let published_at = require_datetime(raw, RECORD, "publishedAt")?;
        let slug = slug_or_derived(raw, &title);
        let images = self.resolve_images(raw.get("images"), &id);

        Ok(BlogPost {
            id,
            title,
            slug,
            description,
            content,
            images,
            author,
            published_at,
            tags: string_seq(raw, "tags"),
        })
    }

    pub fn normalize_skill(&self, raw: &Value) -> Result<Skill, NormalizeError> {
        const RECORD: &str = "skill";

        let id = require_str(raw, RECORD, "_id")?;
        let name = require_str(raw, RECORD, "name")?;
        let image = match raw.get("image") {
            None | Some(Value::Null) => None,
            Some(entry) => self.resolve_entry(entry, 0, &id),
        };

        Ok(Skill {
            id,
            name,
            image,
            category: optional_str(raw, "category"),
            description: optional_str(raw, "description"),
        })
    }

    /// Resolves each raw image entry in order. An `images` field that is
    /// absent, null, or not an array yields an empty sequence. Entries the
    /// resolver rejects are dropped from the output; each drop is counted
    /// and logged, never surfaced to the caller.
    fn resolve_images(&self, field: Option<&Value>, owner: &str) -> Vec<ImageDescriptor> {
        let entries = match field {
            Some(Value::Array(entries)) => entries.as_slice(),
            _ => &[],
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| self.resolve_entry(entry, index, owner))
            .collect()
    }

    fn resolve_entry(&self, entry: &Value, index: usize, owner: &str) -> Option<ImageDescriptor> {
        match self.resolver.resolve(entry) {
            Ok(url) => Some(ImageDescriptor {
                id: descriptor_id(entry, &url, index),
                url,
            }),
            Err(err) => {
                self.metrics.record_image_dropped();
                tracing::warn!(owner = %owner, index, error = %err, "Dropping unresolvable image entry");
                None
            }
        }
    }
}

// ───── Field extraction helpers ─────────────────────────────────────

fn require_str(
    raw: &Value,
    record: &'static str,
    field: &'static str,
) -> Result<String, NormalizeError> {
    match raw.get(field) {
        None | Some(Value::Null) => Err(NormalizeError::MissingField { record, field }),
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(_) => Err(NormalizeError::InvalidField { record, field }),
    }
}

fn optional_str(raw: &Value, field: &str) -> Option<String> {
    raw.get(field).and_then(Value::as_str).map(str::to_string)
}

/// String sequences default to empty when absent; non-string elements are
/// ignored rather than failing the record.
fn string_seq(raw: &Value, field: &str) -> Vec<String> {
    match raw.get(field) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn require_datetime(
    raw: &Value,
    record: &'static str,
    field: &'static str,
) -> Result<DateTime<Utc>, NormalizeError> {
    let text = require_str(raw, record, field)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| NormalizeError::InvalidField { record, field })
}

/// The slug field has appeared as `{current: "..."}` and as a bare string
/// across record revisions; records authored before the field existed have
/// none at all and fall back to a slug derived from the title.
fn slug_or_derived(raw: &Value, title: &str) -> String {
    raw.get("slug")
        .and_then(|field| field.get("current").or(Some(field)))
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slug::slugify(title))
}

/// Identity for a resolved image, stable across repeated normalization of
/// the same record: the entry's `_key` when present, else its asset
/// reference, else a position-qualified name derived from the URL.
fn descriptor_id(entry: &Value, url: &str, index: usize) -> String {
    if let Some(key) = entry.get("_key").and_then(Value::as_str) {
        return key.to_string();
    }
    if let Some(asset_ref) = entry.pointer("/asset/_ref").and_then(Value::as_str) {
        return asset_ref.to_string();
    }
    let stem = url.rsplit('/').next().unwrap_or(url);
    format!("{index}-{stem}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::image::UnresolvableImageError;

    /// Maps absolute https strings to themselves, rejects everything else.
    struct StubResolver;

    impl ResolveImageUrl for StubResolver {
        fn resolve(&self, raw: &Value) -> Result<String, UnresolvableImageError> {
            match raw {
                Value::String(url) if url.starts_with("https://") => Ok(url.clone()),
                _ => Err(UnresolvableImageError::UnrecognizedShape),
            }
        }
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(Arc::new(StubResolver), Arc::new(NormalizerMetrics::default()))
    }

    #[test]
    fn project_images_resolve_in_source_order() {
        let raw = json!({
            "_id": "p1",
            "title": "A",
            "description": "desc",
            "images": ["https://x/1.png", "https://x/2.png"],
        });

        let project = normalizer().normalize_project(&raw).unwrap();
        assert_eq!(
            project.images,
            vec![
                ImageDescriptor {
                    id: "0-1.png".into(),
                    url: "https://x/1.png".into()
                },
                ImageDescriptor {
                    id: "1-2.png".into(),
                    url: "https://x/2.png".into()
                },
            ]
        );
    }

    #[test]
    fn unresolvable_images_are_dropped_and_counted() {
        let raw = json!({
            "_id": "p1",
            "title": "A",
            "description": "desc",
            "images": ["https://x/1.png", 42, "https://x/2.png"],
        });

        let normalizer = normalizer();
        let project = normalizer.normalize_project(&raw).unwrap();

        let urls: Vec<_> = project.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/1.png", "https://x/2.png"]);
        assert_eq!(normalizer.metrics().images_dropped(), 1);
    }

    #[test]
    fn all_images_unresolvable_still_yields_the_entity() {
        let raw = json!({
            "_id": "p1",
            "title": "A",
            "description": "desc",
            "images": [1, 2, 3],
        });

        let project = normalizer().normalize_project(&raw).unwrap();
        assert!(project.images.is_empty());
    }

    #[test]
    fn empty_absent_and_null_images_are_equivalent() {
        let base = json!({"_id": "p1", "title": "A", "description": "desc"});
        let with_empty = json!({"_id": "p1", "title": "A", "description": "desc", "images": []});
        let with_null = json!({"_id": "p1", "title": "A", "description": "desc", "images": null});

        let normalizer = normalizer();
        for raw in [&base, &with_empty, &with_null] {
            assert!(normalizer.normalize_project(raw).unwrap().images.is_empty());
        }
        assert_eq!(normalizer.metrics().images_dropped(), 0);
    }

    #[test]
    fn missing_title_names_the_field() {
        let raw = json!({"_id": "p1", "description": "desc"});
        assert_eq!(
            normalizer().normalize_project(&raw),
            Err(NormalizeError::MissingField {
                record: "project",
                field: "title"
            })
        );
    }

    #[test]
    fn wrong_typed_title_is_invalid_not_missing() {
        let raw = json!({"_id": "p1", "title": 7, "description": "desc"});
        assert_eq!(
            normalizer().normalize_project(&raw),
            Err(NormalizeError::InvalidField {
                record: "project",
                field: "title"
            })
        );
    }

    #[test]
    fn absent_sequences_default_to_empty() {
        let raw = json!({"_id": "p1", "title": "A", "description": "desc"});
        let project = normalizer().normalize_project(&raw).unwrap();
        assert!(project.technologies.is_empty());
        assert!(project.features.is_empty());
        assert!(project.challenges.is_empty());
        assert!(project.learnings.is_empty());
        assert_eq!(project.github_link, None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = json!({
            "_id": "p1",
            "title": "A",
            "description": "desc",
            "images": ["https://x/1.png"],
            "technologies": ["rust"],
            "githubLink": "https://github.com/x/y",
        });

        let normalizer = normalizer();
        let first = normalizer.normalize_project(&raw).unwrap();
        let second = normalizer.normalize_project(&raw).unwrap();
        assert_eq!(first, second);
    }

    fn raw_blog() -> Value {
        json!({
            "_id": "b1",
            "title": "Hello World",
            "slug": {"current": "hello-world"},
            "description": "a post",
            "content": "some words in the body",
            "author": "Jane",
            "publishedAt": "2024-03-01T10:00:00Z",
            "tags": ["rust", "web"],
        })
    }

    #[test]
    fn blog_post_normalizes_slug_and_timestamp() {
        let post = normalizer().normalize_blog_post(&raw_blog()).unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.published_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(post.tags, vec!["rust", "web"]);
    }

    #[test]
    fn blog_slug_accepts_bare_string_shape() {
        let mut raw = raw_blog();
        raw["slug"] = json!("plain-slug");
        let post = normalizer().normalize_blog_post(&raw).unwrap();
        assert_eq!(post.slug, "plain-slug");
    }

    #[test]
    fn blog_slug_falls_back_to_title() {
        let mut raw = raw_blog();
        raw.as_object_mut().unwrap().remove("slug");
        let post = normalizer().normalize_blog_post(&raw).unwrap();
        assert_eq!(post.slug, "hello-world");
    }

    #[test]
    fn blog_with_bad_timestamp_is_invalid() {
        let mut raw = raw_blog();
        raw["publishedAt"] = json!("yesterday");
        assert_eq!(
            normalizer().normalize_blog_post(&raw),
            Err(NormalizeError::InvalidField {
                record: "blog",
                field: "publishedAt"
            })
        );
    }

    #[test]
    fn skill_keeps_going_when_icon_is_unresolvable() {
        let raw = json!({"_id": "s1", "name": "Rust", "image": {"bogus": true}});
        let normalizer = normalizer();
        let skill = normalizer.normalize_skill(&raw).unwrap();
        assert_eq!(skill.image, None);
        assert_eq!(normalizer.metrics().images_dropped(), 1);
    }

    #[test]
    fn skill_without_icon_is_not_a_drop() {
        let raw = json!({"_id": "s1", "name": "Rust"});
        let normalizer = normalizer();
        let skill = normalizer.normalize_skill(&raw).unwrap();
        assert_eq!(skill.image, None);
        assert_eq!(normalizer.metrics().images_dropped(), 0);
    }

    #[test]
    fn image_id_prefers_key_over_derived_name() {
        let raw = json!({
            "_id": "b1",
            "title": "A",
            "description": "d",
            "images": [{"_key": "k123", "asset": {"url": "https://cdn/x.png"}}],
        });

        struct AssetUrlResolver;
        impl ResolveImageUrl for AssetUrlResolver {
            fn resolve(&self, raw: &Value) -> Result<String, UnresolvableImageError> {
                raw.pointer("/asset/url")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or(UnresolvableImageError::MissingUrl)
            }
        }

        let normalizer = Normalizer::new(
            Arc::new(AssetUrlResolver),
            Arc::new(NormalizerMetrics::default()),
        );
        let project = normalizer.normalize_project(&raw).unwrap();
        assert_eq!(project.images[0].id, "k123");
    }
}
