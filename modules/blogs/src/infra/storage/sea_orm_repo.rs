use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::models::{Article, Blog};
use crate::domain::repo::BlogsRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{article, blog};

/// ORM-based implementation of [`BlogsRepository`].
#[derive(Clone)]
pub struct SeaOrmBlogsRepository {
    db: DatabaseConnection,
}

impl SeaOrmBlogsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogsRepository for SeaOrmBlogsRepository {
    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, DomainError> {
        let found = blog::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_blog_by_name(&self, name: &str) -> Result<Option<Blog>, DomainError> {
        let found = blog::Entity::find()
            .filter(blog::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn count_blogs_by_name(&self, name: &str) -> Result<u64, DomainError> {
        blog::Entity::find()
            .filter(blog::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn insert_blog(&self, b: Blog) -> Result<Blog, DomainError> {
        let m = blog::ActiveModel {
            id: Set(b.id),
            name: Set(b.name.clone()),
        };

        m.insert(&self.db).await.map_err(db_err)?;
        Ok(b)
    }

    async fn delete_blog(&self, id: Uuid) -> Result<bool, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // SQLite reports RESTRICT violations as a trigger constraint, not as an FK error
        let referencing = article::Entity::find()
            .filter(article::Column::BlogId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        if referencing > 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::blog_still_referenced(id));
        }

        let deleted = match blog::Entity::delete_by_id(id).exec(&txn).await {
            Ok(result) => result.rows_affected > 0,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                return Err(DomainError::blog_still_referenced(id));
            }
            Err(e) => return Err(db_err(e)),
        };

        txn.commit().await.map_err(db_err)?;
        Ok(deleted)
    }

    async fn find_article_by_title(&self, title: &str) -> Result<Option<Article>, DomainError> {
        let found = article::Entity::find()
            .filter(article::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn insert_article(&self, a: Article) -> Result<Article, DomainError> {
        let m = article::ActiveModel {
            id: Set(a.id),
            blog_id: Set(a.blog_id),
            subtitle: Set(a.subtitle.clone()),
            title: Set(a.title.clone()),
        };

        m.insert(&self.db).await.map_err(db_err)?;
        Ok(a)
    }
}
