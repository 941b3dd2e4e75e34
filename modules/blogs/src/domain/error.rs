use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Article title cannot be empty")]
    EmptyTitle,

    #[error("Blog not found: {id}")]
    BlogNotFound { id: Uuid },

    #[error("Blog {id} is still referenced by articles")]
    BlogStillReferenced { id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn blog_not_found(id: Uuid) -> Self {
        Self::BlogNotFound { id }
    }

    #[must_use]
    pub fn blog_still_referenced(id: Uuid) -> Self {
        Self::BlogStillReferenced { id }
    }

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
