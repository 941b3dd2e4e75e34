//! Blogs and their articles, persisted through SeaORM.
//!
//! The crate exists to observe how SeaORM translates filters into SQL: it
//! declares the `blogs`/`articles` schema, seeds one blog with one article and
//! runs a fixed set of query [`probes`] whose emitted SQL is captured with
//! `sql-capture` and checked for the expected predicate family.

pub mod config;
pub mod domain;
pub mod infra;
pub mod probes;

pub use config::{DatabaseConfig, ProbeConfig, SeedConfig};
pub use domain::error::DomainError;
pub use domain::models::{Article, ArticleWithBlog, Blog};
pub use domain::service::{BlogsService, SeedOutcome};
