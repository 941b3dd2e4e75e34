use serde::{Deserialize, Serialize};

/// Connection string used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://eftests.db?mode=rwc";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool size; ignored for in-memory `SQLite`, which always uses one connection.
    pub max_connections: Option<u32>,
    /// Let sqlx log every statement on its own.
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: None,
            sqlx_logging: false,
        }
    }
}

/// Names looked up (and created when missing) by the seeding step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub blog_name: String,
    pub article_title: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            blog_name: "BlogName".to_owned(),
            article_title: "Article Title".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Term every probe filters on.
    pub search: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            search: "Name".to_owned(),
        }
    }
}
