use crate::DbError;
use core_types::{Document, DocumentCreate};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{FromRow, QueryBuilder, Transaction};
use std::collections::{HashMap, HashSet};

/// The `DbRepository` is the entry point to the document store. It holds the
/// shared pool and hands out one `DocumentSession` per request.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

/// A row of the `documents` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbDocument {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub doc_type: String,
    pub title: String,
    pub position: i64,
}

impl DbDocument {
    /// Overwrites every mutable field from `data`. `id` is left untouched.
    pub fn apply(&mut self, data: &DocumentCreate) {
        self.doc_type = data.doc_type.clone();
        self.title = data.title.clone();
        self.position = data.position;
    }
}

impl From<DbDocument> for Document {
    fn from(row: DbDocument) -> Self {
        Document {
            id: row.id,
            doc_type: row.doc_type,
            title: row.title,
            position: row.position,
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begins a read-only unit of work. The connection is held until the
    /// session is dropped.
    pub async fn session(&self) -> Result<DocumentSession, DbError> {
        let tx = self.pool.begin().await?;
        Ok(DocumentSession { tx })
    }

    /// Begins a unit of work that will write.
    ///
    /// The write lock is taken up front (`BEGIN IMMEDIATE`), so concurrent
    /// writers queue on the busy timeout instead of failing when a deferred
    /// read lock cannot be upgraded.
    pub async fn write_session(&self) -> Result<DocumentSession, DbError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(DocumentSession { tx })
    }
}

/// A request-scoped view of the store backed by a single transaction.
///
/// Writes only become durable through `commit`. Dropping the session on any
/// other path (an early `?` return included) rolls the transaction back and
/// returns the connection to the pool.
pub struct DocumentSession {
    tx: Transaction<'static, Sqlite>,
}

impl DocumentSession {
    /// Fetches every document ordered by `position`.
    ///
    /// Ties on `position` fall back to `id`; callers should not depend on that.
    pub async fn list_all(&mut self) -> Result<Vec<DbDocument>, DbError> {
        let documents = sqlx::query_as::<_, DbDocument>(
            r#"SELECT id, "type", title, position FROM documents ORDER BY position ASC, id ASC"#,
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(documents)
    }

    pub async fn count(&mut self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    /// Looks up a document by primary key. Absence is not an error.
    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<DbDocument>, DbError> {
        let document = sqlx::query_as::<_, DbDocument>(
            r#"SELECT id, "type", title, position FROM documents WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(document)
    }

    /// Fetches the documents whose `type` is in `types`, keyed by type.
    ///
    /// Types with no stored document are simply absent from the map.
    pub async fn find_by_types(
        &mut self,
        types: &HashSet<String>,
    ) -> Result<HashMap<String, DbDocument>, DbError> {
        if types.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(r#"SELECT id, "type", title, position FROM documents WHERE "type" IN ("#);
        let mut separated = query.separated(", ");
        for doc_type in types {
            separated.push_bind(doc_type.as_str());
        }
        separated.push_unseparated(")");

        let documents = query
            .build_query_as::<DbDocument>()
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(documents
            .into_iter()
            .map(|document| (document.doc_type.clone(), document))
            .collect())
    }

    /// Inserts a new document and returns it with its assigned `id`.
    ///
    /// Fails with `DbError::UniqueViolation` when `type` is already taken.
    pub async fn insert(&mut self, data: &DocumentCreate) -> Result<DbDocument, DbError> {
        sqlx::query_as::<_, DbDocument>(
            r#"
            INSERT INTO documents ("type", title, position)
            VALUES (?, ?, ?)
            RETURNING id, "type", title, position
            "#,
        )
        .bind(&data.doc_type)
        .bind(&data.title)
        .bind(data.position)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DbError::from_write(e, &data.doc_type))
    }

    /// Replaces `type`, `title` and `position` of an existing document, both
    /// in the store and in `document` itself.
    pub async fn update(
        &mut self,
        document: &mut DbDocument,
        data: &DocumentCreate,
    ) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"UPDATE documents SET "type" = ?, title = ?, position = ? WHERE id = ?"#,
        )
        .bind(&data.doc_type)
        .bind(&data.title)
        .bind(data.position)
        .bind(document.id)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DbError::from_write(e, &data.doc_type))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        document.apply(data);
        Ok(())
    }

    /// Permanently removes a document.
    pub async fn delete(&mut self, document: DbDocument) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(document.id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Makes every write in this session durable and releases the connection.
    pub async fn commit(self) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }
}
