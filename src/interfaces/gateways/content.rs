use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::errors::AppError;

/// Read-side capability over the external content store. Implementations
/// return raw, unvalidated records; turning them into canonical entities is
/// the normalizer's job.
#[automock]
#[async_trait]
pub trait ContentGateway: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<Value>, AppError>;
    async fn fetch_project_by_id(&self, id: &str) -> Result<Option<Value>, AppError>;
    async fn fetch_blog_posts(&self) -> Result<Vec<Value>, AppError>;
    async fn fetch_blog_post_by_slug(&self, slug: &str) -> Result<Option<Value>, AppError>;
    async fn fetch_skills(&self) -> Result<Vec<Value>, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}
