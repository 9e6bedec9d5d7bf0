use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// A document as it is returned to callers.
///
/// `id` is assigned by the store and never changes. `position` drives the
/// display order; it is neither contiguous nor unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub title: String,
    pub position: i64,
}

/// The caller-supplied fields of a document.
///
/// Used for create, full replace and batch reorder alike. Every field is
/// required; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCreate {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub title: String,
    pub position: i64,
}

impl DocumentCreate {
    pub fn new(doc_type: impl Into<String>, title: impl Into<String>, position: i64) -> Self {
        Self {
            doc_type: doc_type.into(),
            title: title.into(),
            position,
        }
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.doc_type.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "type".to_string(),
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_serializes_type_key() {
        let doc = Document {
            id: 7,
            doc_type: "invoice".to_string(),
            title: "Invoice".to_string(),
            position: 2,
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({ "id": 7, "type": "invoice", "title": "Invoice", "position": 2 })
        );
    }

    #[test]
    fn create_requires_every_field() {
        let missing_position = json!({ "type": "invoice", "title": "Invoice" });
        assert!(serde_json::from_value::<DocumentCreate>(missing_position).is_err());

        let wrong_type = json!({ "type": "invoice", "title": "Invoice", "position": "2" });
        assert!(serde_json::from_value::<DocumentCreate>(wrong_type).is_err());
    }

    #[test]
    fn create_ignores_client_supplied_id() {
        let payload = json!({ "id": 99, "type": "invoice", "title": "Invoice", "position": 2 });
        let parsed: DocumentCreate = serde_json::from_value(payload).unwrap();
        assert_eq!(parsed, DocumentCreate::new("invoice", "Invoice", 2));
    }

    #[test]
    fn blank_type_is_rejected() {
        let err = DocumentCreate::new("   ", "Blank", 0).validate().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("type".to_string(), "must not be empty".to_string())
        );
        assert!(DocumentCreate::new("invoice", "", 0).validate().is_ok());
    }
}
