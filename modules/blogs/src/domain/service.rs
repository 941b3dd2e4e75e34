use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SeedConfig;
use crate::domain::error::DomainError;
use crate::domain::models::{Article, Blog};
use crate::domain::repo::BlogsRepository;

/// What [`BlogsService::seed`] found or created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedOutcome {
    pub blog: Blog,
    pub blog_created: bool,
    pub article: Article,
    pub article_created: bool,
}

pub struct BlogsService<R> {
    repo: R,
}

impl<R: BlogsRepository> BlogsService<R> {
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[must_use]
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Make sure the configured blog and its article exist.
    ///
    /// Lookups go by blog name and article title; rows are inserted only when
    /// missing, so running it again changes nothing. A newly created article
    /// is attached to the seeded blog.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyTitle`] for a blank article title, or
    /// [`DomainError::Database`] when a lookup or insert fails.
    pub async fn seed(&self, cfg: &SeedConfig) -> Result<SeedOutcome, DomainError> {
        let (blog, blog_created) = match self.repo.find_blog_by_name(&cfg.blog_name).await? {
            Some(blog) => (blog, false),
            None => {
                let blog = self.repo.insert_blog(Blog::named(&cfg.blog_name)).await?;
                info!(blog_id = %blog.id, name = %cfg.blog_name, "seeded blog");
                (blog, true)
            }
        };

        let (article, article_created) =
            match self.repo.find_article_by_title(&cfg.article_title).await? {
                Some(article) => (article, false),
                None => {
                    let article = new_article(&cfg.article_title, blog.id)?;
                    let article = self.repo.insert_article(article).await?;
                    info!(article_id = %article.id, blog_id = %blog.id, "seeded article");
                    (article, true)
                }
            };

        debug!(blog_created, article_created, "seeding finished");
        Ok(SeedOutcome {
            blog,
            blog_created,
            article,
            article_created,
        })
    }

    /// # Errors
    ///
    /// [`DomainError::BlogStillReferenced`] while articles point at the blog,
    /// [`DomainError::BlogNotFound`] when nothing was deleted.
    pub async fn delete_blog(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete_blog(id).await? {
            info!(blog_id = %id, "blog deleted");
            Ok(())
        } else {
            Err(DomainError::blog_not_found(id))
        }
    }
}

fn new_article(title: &str, blog_id: Uuid) -> Result<Article, DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    Ok(Article {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        subtitle: None,
        blog_id: Some(blog_id),
    })
}
