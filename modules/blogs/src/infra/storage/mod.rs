//! Storage layer: every SeaORM-specific piece of the crate.
//!
//! - `entity/` - entity definitions for `blogs` and `articles`
//! - `migrations/` - schema migrations
//! - `mapper.rs` - conversions between entity models and domain types
//! - `db.rs` - connection setup with SQL capture installed
//! - `sea_orm_repo.rs` - `BlogsRepository` implementation

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;
