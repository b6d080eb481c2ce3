use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Upper bounds for list query parameters.
pub const MAX_PER_PAGE: u32 = 100;
pub const MAX_RECENT_LIMIT: u32 = 50;
