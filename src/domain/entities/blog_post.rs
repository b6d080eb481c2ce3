use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    carousel::CarouselView,
    entities::image::ImageDescriptor,
    read_time::estimate_read_time,
    utils::markdown::safe_content_html,
};

/// Canonical blog post. `published_at` drives descending chronological
/// ordering wherever posts are listed; `slug` is the public URL identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub images: Vec<ImageDescriptor>,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlogPostListResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub read_time_minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct BlogPostDetailResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content_html: String,
    pub images: Vec<ImageDescriptor>,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub read_time_minutes: u32,
    pub carousel: Option<CarouselView>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl BlogPost {
    pub fn to_list_response(&self, words_per_minute: u32) -> BlogPostListResponse {
        BlogPostListResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            cover_image_url: self.images.first().map(|image| image.url.clone()),
            published_at: self.published_at,
            tags: self.tags.clone(),
            read_time_minutes: estimate_read_time(&self.content, words_per_minute),
        }
    }

    pub fn to_detail_response(
        &self,
        words_per_minute: u32,
        carousel: Option<CarouselView>,
    ) -> BlogPostDetailResponse {
        BlogPostDetailResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            content_html: safe_content_html(&self.content),
            images: self.images.clone(),
            author: self.author.clone(),
            published_at: self.published_at,
            tags: self.tags.clone(),
            read_time_minutes: estimate_read_time(&self.content, words_per_minute),
            carousel,
        }
    }
}
