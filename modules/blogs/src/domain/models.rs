use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blog {
    pub id: Uuid,
    pub name: Option<String>,
}

impl Blog {
    /// A blog with a fresh random id.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Some(name.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    /// Owning blog, if any.
    pub blog_id: Option<Uuid>,
}

/// An article loaded together with its blog (a left join: the blog may be absent).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleWithBlog {
    pub article: Article,
    pub blog: Option<Blog>,
}
