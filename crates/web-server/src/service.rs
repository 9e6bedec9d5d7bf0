use crate::error::AppError;
use core_types::{Document, DocumentCreate};
use database::DbRepository;
use std::collections::HashSet;

/// The document operations behind the HTTP API.
///
/// Each mutating call opens one session, performs its writes and commits
/// once. Any error before the commit drops the session and rolls back.
/// Concurrent writers are not coordinated: the last commit wins.
#[derive(Debug, Clone)]
pub struct DocumentService {
    repo: DbRepository,
}

impl DocumentService {
    pub fn new(repo: DbRepository) -> Self {
        Self { repo }
    }

    /// All documents, ascending by `position`.
    pub async fn list(&self) -> Result<Vec<Document>, AppError> {
        let mut session = self.repo.session().await?;
        let documents = session.list_all().await?;
        Ok(documents.into_iter().map(Document::from).collect())
    }

    /// Fails with `Conflict` if `type` is already in use.
    pub async fn create(&self, data: DocumentCreate) -> Result<Document, AppError> {
        data.validate()?;

        let mut session = self.repo.write_session().await?;
        let created = session.insert(&data).await?;
        session.commit().await?;

        tracing::info!(id = created.id, doc_type = %created.doc_type, "Document created.");
        Ok(created.into())
    }

    /// Full replace of `type`, `title` and `position`.
    pub async fn update(&self, id: i64, data: DocumentCreate) -> Result<Document, AppError> {
        data.validate()?;

        let mut session = self.repo.write_session().await?;
        let mut document = session
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::document_not_found(id))?;
        session.update(&mut document, &data).await?;
        session.commit().await?;

        tracing::info!(id, doc_type = %document.doc_type, "Document updated.");
        Ok(document.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut session = self.repo.write_session().await?;
        let document = session
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::document_not_found(id))?;
        session.delete(document).await?;
        session.commit().await?;

        tracing::info!(id, "Document deleted.");
        Ok(())
    }

    /// Applies a client-ordered batch by matching on `type`.
    ///
    /// Entries whose `type` has no stored document are skipped: this endpoint
    /// only updates, it never creates. A blank `type` never matches a stored
    /// document, so such entries are skipped as well. The whole batch commits
    /// once, and the response is the full list re-read after the commit.
    pub async fn batch_update(&self, batch: Vec<DocumentCreate>) -> Result<Vec<Document>, AppError> {
        let types: HashSet<String> = batch.iter().map(|entry| entry.doc_type.clone()).collect();

        let mut session = self.repo.write_session().await?;
        let mut by_type = session.find_by_types(&types).await?;

        let mut applied = 0usize;
        for entry in &batch {
            match by_type.get_mut(&entry.doc_type) {
                Some(document) => {
                    session.update(document, entry).await?;
                    applied += 1;
                }
                None => {
                    tracing::debug!(doc_type = %entry.doc_type, "Skipping batch entry with unknown type.");
                }
            }
        }
        session.commit().await?;

        tracing::info!(received = batch.len(), applied, "Batch update committed.");
        self.list().await
    }
}
