pub mod article;
pub mod blog;
