use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r"
CREATE TABLE IF NOT EXISTS blogs (
    id UUID NOT NULL,
    name TEXT NULL,
    CONSTRAINT PK_blogs PRIMARY KEY (id)
);

CREATE TABLE IF NOT EXISTS articles (
    id UUID NOT NULL,
    blogid UUID NULL,
    subtitle TEXT NULL,
    title TEXT NOT NULL,
    CONSTRAINT PK_articles PRIMARY KEY (id),
    CONSTRAINT FK_articles_blogs_blogid FOREIGN KEY (blogid) REFERENCES blogs(id) ON DELETE RESTRICT
);

CREATE INDEX IF NOT EXISTS IX_articles_blogid ON articles(blogid);
                "
            }
            sea_orm::DatabaseBackend::MySql => {
                r"
CREATE TABLE IF NOT EXISTS blogs (
    id BINARY(16) NOT NULL,
    name TEXT NULL,
    CONSTRAINT PK_blogs PRIMARY KEY (id)
);

CREATE TABLE IF NOT EXISTS articles (
    id BINARY(16) NOT NULL,
    blogid BINARY(16) NULL,
    subtitle TEXT NULL,
    title TEXT NOT NULL,
    CONSTRAINT PK_articles PRIMARY KEY (id),
    INDEX IX_articles_blogid (blogid),
    CONSTRAINT FK_articles_blogs_blogid FOREIGN KEY (blogid) REFERENCES blogs(id) ON DELETE RESTRICT
);
                "
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r"
CREATE TABLE IF NOT EXISTS blogs (
    id TEXT NOT NULL,
    name TEXT NULL,
    CONSTRAINT PK_blogs PRIMARY KEY (id)
);

CREATE TABLE IF NOT EXISTS articles (
    id TEXT NOT NULL,
    blogid TEXT NULL,
    subtitle TEXT NULL,
    title TEXT NOT NULL,
    CONSTRAINT PK_articles PRIMARY KEY (id),
    CONSTRAINT FK_articles_blogs_blogid FOREIGN KEY (blogid) REFERENCES blogs(id) ON DELETE RESTRICT
);

CREATE INDEX IF NOT EXISTS IX_articles_blogid ON articles(blogid);
                "
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // articles first: it holds the foreign key
        let sql = r"
DROP TABLE IF EXISTS articles;
DROP TABLE IF EXISTS blogs;
        ";

        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
