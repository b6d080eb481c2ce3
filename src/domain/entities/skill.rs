use serde::{Deserialize, Serialize};

use crate::entities::image::ImageDescriptor;

/// A labeled capability with an icon. Served as-is; skills have no separate
/// list/detail shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub image: Option<ImageDescriptor>,
    pub category: Option<String>,
    pub description: Option<String>,
}
