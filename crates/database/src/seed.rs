use crate::{DbError, DbRepository};
use core_types::DocumentCreate;

/// The starter documents as `(type, title)`, in display order.
pub const SEED_DOCUMENTS: [(&str, &str); 5] = [
    ("bank-draft", "Bank Draft"),
    ("bill-of-lading", "Bill of Lading"),
    ("invoice", "Invoice"),
    ("bank-draft-2", "Bank Draft 2"),
    ("bill-of-lading-2", "Bill of Lading 2"),
];

/// Inserts the starter documents, positions 0 to 4, if the store holds no rows.
///
/// The emptiness check reads persisted state, so running this on every
/// startup is safe. Returns the number of documents inserted.
pub async fn seed_if_empty(repo: &DbRepository) -> Result<usize, DbError> {
    let mut session = repo.write_session().await?;

    let existing = session.count().await?;
    if existing > 0 {
        tracing::debug!(existing, "Store is not empty; skipping seed.");
        return Ok(0);
    }

    for (position, (doc_type, title)) in SEED_DOCUMENTS.iter().enumerate() {
        session
            .insert(&DocumentCreate::new(*doc_type, *title, position as i64))
            .await?;
    }
    session.commit().await?;

    tracing::info!(count = SEED_DOCUMENTS.len(), "Seeded starter documents.");
    Ok(SEED_DOCUMENTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect, run_migrations};

    async fn repository() -> DbRepository {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        DbRepository::new(pool)
    }

    #[tokio::test]
    async fn seeds_empty_store_in_order() {
        let repo = repository().await;
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 5);

        let mut session = repo.session().await.unwrap();
        let docs = session.list_all().await.unwrap();
        let summary: Vec<(&str, &str, i64)> = docs
            .iter()
            .map(|d| (d.doc_type.as_str(), d.title.as_str(), d.position))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("bank-draft", "Bank Draft", 0),
                ("bill-of-lading", "Bill of Lading", 1),
                ("invoice", "Invoice", 2),
                ("bank-draft-2", "Bank Draft 2", 3),
                ("bill-of-lading-2", "Bill of Lading 2", 4),
            ]
        );
    }

    #[tokio::test]
    async fn second_seed_is_a_no_op() {
        let repo = repository().await;
        seed_if_empty(&repo).await.unwrap();
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 0);

        let mut session = repo.session().await.unwrap();
        assert_eq!(session.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn non_empty_store_is_left_alone() {
        let repo = repository().await;
        let mut session = repo.write_session().await.unwrap();
        session
            .insert(&DocumentCreate::new("custom", "Custom", 0))
            .await
            .unwrap();
        session.commit().await.unwrap();

        assert_eq!(seed_if_empty(&repo).await.unwrap(), 0);
        let mut session = repo.session().await.unwrap();
        assert_eq!(session.count().await.unwrap(), 1);
    }
}
