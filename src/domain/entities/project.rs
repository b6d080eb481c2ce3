use serde::{Deserialize, Serialize};

use crate::{carousel::CarouselView, entities::image::ImageDescriptor};

/// Canonical portfolio project, normalized from one raw content-store
/// record. `images` preserves the source order; it is the display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<ImageDescriptor>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub challenges: Vec<String>,
    pub learnings: Vec<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_image_url: Option<String>,
    pub image_count: usize,
    pub technologies: Vec<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<ImageDescriptor>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub challenges: Vec<String>,
    pub learnings: Vec<String>,
    pub carousel: Option<CarouselView>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl Project {
    pub fn to_list_response(&self) -> ProjectListResponse {
        ProjectListResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            cover_image_url: self.images.first().map(|image| image.url.clone()),
            image_count: self.images.len(),
            technologies: self.technologies.clone(),
            github_link: self.github_link.clone(),
            live_link: self.live_link.clone(),
        }
    }

    pub fn to_detail_response(&self, carousel: Option<CarouselView>) -> ProjectDetailResponse {
        ProjectDetailResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            images: self.images.clone(),
            github_link: self.github_link.clone(),
            live_link: self.live_link.clone(),
            technologies: self.technologies.clone(),
            features: self.features.clone(),
            challenges: self.challenges.clone(),
            learnings: self.learnings.clone(),
            carousel,
        }
    }
}
