pub mod blog_post;
pub mod contact;
pub mod image;
pub mod project;
pub mod skill;
