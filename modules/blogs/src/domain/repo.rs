use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::models::{Article, Blog};

/// Persistence port for blogs and articles.
#[async_trait]
pub trait BlogsRepository: Send + Sync {
    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, DomainError>;

    /// First blog with exactly this name.
    async fn find_blog_by_name(&self, name: &str) -> Result<Option<Blog>, DomainError>;

    async fn count_blogs_by_name(&self, name: &str) -> Result<u64, DomainError>;

    async fn insert_blog(&self, blog: Blog) -> Result<Blog, DomainError>;

    /// Returns `false` when no row matched.
    ///
    /// Fails with [`DomainError::BlogStillReferenced`] while articles point at the blog.
    async fn delete_blog(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn find_article_by_title(&self, title: &str) -> Result<Option<Article>, DomainError>;

    async fn insert_article(&self, article: Article) -> Result<Article, DomainError>;
}
