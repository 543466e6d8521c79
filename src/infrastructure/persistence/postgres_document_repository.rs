use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::dto::{SortField, SortOrder};
use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::entities::Document;
use crate::domain::value_objects::{
    ContentType, DocumentId, DocumentName, DocumentSize, Locator,
};

const SELECT_COLUMNS: &str =
    "id, name, locator, size_bytes, content_type, created_at, updated_at";

pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_save_error(e: sqlx::Error) -> RepositoryError {
    // 23505 is unique_violation; the name/locator constraints are the final
    // arbiter for races past the use case's fast-path existence check.
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return RepositoryError::ConstraintViolation(db.message().to_string());
        }
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, RepositoryError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::into_domain).transpose()
    }

    async fn find_by_name(
        &self,
        name: &DocumentName,
    ) -> Result<Option<Document>, RepositoryError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM documents WHERE name = $1"
        ))
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::into_domain).transpose()
    }

    async fn save(&self, document: &Document) -> Result<Document, RepositoryError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            r#"
            INSERT INTO documents (id, name, locator, size_bytes, content_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                locator = EXCLUDED.locator,
                size_bytes = EXCLUDED.size_bytes,
                content_type = EXCLUDED.content_type,
                updated_at = now()
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(document.id().as_uuid())
        .bind(document.name().as_str())
        .bind(document.locator().as_str())
        .bind(document.size().bytes() as i64)
        .bind(document.content_type().as_str())
        .bind(document.created_at())
        .bind(document.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(map_save_error)?;

        row.into_domain()
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), RepositoryError> {
        // Idempotent: zero rows affected is fine, existence was the caller's check.
        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_page(
        &self,
        offset: i64,
        limit: i64,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<Document>, RepositoryError> {
        // Only these fixed strings ever reach the query text; the enums are
        // the allow-list.
        let sort_column = match sort_field {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::Size => "size_bytes",
        };
        let sort_dir = match sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM documents ORDER BY {sort_column} {sort_dir} LIMIT $1 OFFSET $2"
        );

        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(DocumentRow::into_domain).collect()
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn total_size_all(&self) -> Result<i64, RepositoryError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(size_bytes), 0)::BIGINT FROM documents")
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    async fn find_all_locators(&self) -> Result<Vec<Locator>, RepositoryError> {
        let raw: Vec<String> = sqlx::query_scalar("SELECT locator FROM documents")
            .fetch_all(&self.pool)
            .await?;

        raw.into_iter()
            .map(|value| {
                Locator::new(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
            })
            .collect()
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: uuid::Uuid,
    name: String,
    locator: String,
    size_bytes: i64,
    content_type: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl DocumentRow {
    fn into_domain(self) -> Result<Document, RepositoryError> {
        let name = DocumentName::new(&self.name)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let locator = Locator::new(self.locator)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let size = DocumentSize::new(self.size_bytes as u64)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let content_type = self
            .content_type
            .parse::<ContentType>()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(Document::reconstruct(
            DocumentId::from_uuid(self.id),
            name,
            locator,
            size,
            content_type,
            self.created_at,
            self.updated_at,
        ))
    }
}
