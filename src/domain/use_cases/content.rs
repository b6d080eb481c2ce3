use serde::Serialize;
use serde_json::Value;

use crate::{
    carousel::{CarouselState, CarouselView},
    entities::{
        blog_post::{BlogPost, BlogPostDetailResponse, BlogPostListResponse},
        project::{Project, ProjectDetailResponse, ProjectListResponse},
        skill::Skill,
    },
    errors::AppError,
    gateways::content::ContentGateway,
    normalize::{NormalizeError, Normalizer, NormalizerMetrics},
};

/// How many recent posts the aggregated landing payload carries.
const RECENT_POSTS_ON_OVERVIEW: u32 = 3;

/// Aggregated payload for the landing page: every section in one round trip.
#[derive(Debug, Serialize)]
pub struct PortfolioOverview {
    pub projects: Vec<ProjectListResponse>,
    pub recent_posts: Vec<BlogPostListResponse>,
    pub skills: Vec<Skill>,
}

pub struct ContentHandler<G>
where
    G: ContentGateway,
{
    pub gateway: G,
    normalizer: Normalizer,
    words_per_minute: u32,
}

impl<G> ContentHandler<G>
where
    G: ContentGateway,
{
    pub fn new(gateway: G, normalizer: Normalizer, words_per_minute: u32) -> Self {
        ContentHandler {
            gateway,
            normalizer,
            words_per_minute,
        }
    }

    /// Lists all projects in store order.
    pub async fn list_projects(&self) -> Result<Vec<ProjectListResponse>, AppError> {
        let raws = self.gateway.fetch_projects().await?;
        let projects =
            self.normalize_collection(&raws, |raw| self.normalizer.normalize_project(raw));

        Ok(projects.iter().map(Project::to_list_response).collect())
    }

    /// Retrieves one project with a carousel block positioned at
    /// `image_index` (index 0 when not given).
    pub async fn get_project_by_id(
        &self,
        id: &str,
        image_index: Option<usize>,
    ) -> Result<ProjectDetailResponse, AppError> {
        let raw = self
            .gateway
            .fetch_project_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let project = self.normalizer.normalize_project(&raw)?;
        let carousel = carousel_view(project.images.len(), image_index);

        Ok(project.to_detail_response(carousel))
    }

    /// Lists blog posts newest first, sliced by 1-based `page`.
    pub async fn list_blog_posts(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<BlogPostListResponse>, AppError> {
        let posts = self.sorted_blog_posts().await?;

        let start = page_offset(page, per_page).min(posts.len());
        let end = (start + per_page as usize).min(posts.len());

        Ok(posts[start..end]
            .iter()
            .map(|post| post.to_list_response(self.words_per_minute))
            .collect())
    }

    /// The newest `limit` posts.
    pub async fn recent_blog_posts(
        &self,
        limit: u32,
    ) -> Result<Vec<BlogPostListResponse>, AppError> {
        let posts = self.sorted_blog_posts().await?;

        Ok(posts
            .iter()
            .take(limit as usize)
            .map(|post| post.to_list_response(self.words_per_minute))
            .collect())
    }

    /// Retrieves one post by slug, with rendered content and a carousel
    /// block positioned at `image_index`.
    pub async fn get_blog_post_by_slug(
        &self,
        slug: &str,
        image_index: Option<usize>,
    ) -> Result<BlogPostDetailResponse, AppError> {
        let raw = self
            .gateway
            .fetch_blog_post_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        let post = self.normalizer.normalize_blog_post(&raw)?;
        let carousel = carousel_view(post.images.len(), image_index);

        Ok(post.to_detail_response(self.words_per_minute, carousel))
    }

    /// Lists all skills in store order.
    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let raws = self.gateway.fetch_skills().await?;
        Ok(self.normalize_collection(&raws, |raw| self.normalizer.normalize_skill(raw)))
    }

    /// Aggregated payload for the landing page; section fetches run
    /// concurrently.
    pub async fn portfolio_overview(&self) -> Result<PortfolioOverview, AppError> {
        let (projects, recent_posts, skills) = futures::try_join!(
            self.list_projects(),
            self.recent_blog_posts(RECENT_POSTS_ON_OVERVIEW),
            self.list_skills(),
        )?;

        Ok(PortfolioOverview {
            projects,
            recent_posts,
            skills,
        })
    }

    /// Health probe against the content store.
    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.gateway.check_connection().await
    }

    pub fn metrics(&self) -> &NormalizerMetrics {
        self.normalizer.metrics()
    }

    /// The store orders listings itself, but the descending-date invariant
    /// is re-applied here rather than trusted.
    async fn sorted_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let raws = self.gateway.fetch_blog_posts().await?;
        let mut posts =
            self.normalize_collection(&raws, |raw| self.normalizer.normalize_blog_post(raw));

        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    /// Normalizes a fetched collection, skipping records that fail instead
    /// of aborting the whole listing. Skips are counted and logged.
    fn normalize_collection<T>(
        &self,
        raws: &[Value],
        normalize: impl Fn(&Value) -> Result<T, NormalizeError>,
    ) -> Vec<T> {
        raws.iter()
            .filter_map(|raw| match normalize(raw) {
                Ok(entity) => Some(entity),
                Err(err) => {
                    self.normalizer.metrics().record_skipped();
                    tracing::warn!(error = %err, "Skipping malformed content record");
                    None
                }
            })
            .collect()
    }
}

/// Helper to compute the slice offset from 1-based `page` and `per_page`.
fn page_offset(page: u32, per_page: u32) -> usize {
    (page.saturating_sub(1) as usize) * (per_page as usize)
}

fn carousel_view(image_count: usize, image_index: Option<usize>) -> Option<CarouselView> {
    if image_count == 0 {
        return None;
    }

    let state = match image_index {
        Some(index) => CarouselState::at(image_count, index),
        None => CarouselState::new(image_count),
    };

    Some(CarouselView::from(state))
}
