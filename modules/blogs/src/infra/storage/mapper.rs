use crate::domain::models::{Article, ArticleWithBlog, Blog};
use crate::infra::storage::entity::{article, blog};

impl From<blog::Model> for Blog {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<article::Model> for Article {
    fn from(m: article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            subtitle: m.subtitle,
            blog_id: m.blog_id,
        }
    }
}

impl From<(article::Model, Option<blog::Model>)> for ArticleWithBlog {
    fn from((article, blog): (article::Model, Option<blog::Model>)) -> Self {
        Self {
            article: article.into(),
            blog: blog.map(Into::into),
        }
    }
}
