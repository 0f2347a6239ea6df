//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file stored in Sharebox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Name the file was uploaded under.
    pub original_name: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes; always equals the stored object's length.
    pub size_bytes: i64,
    /// Object-store key. Unique and immutable after creation.
    pub object_key: String,
    /// The folder containing this file (NULL for root-level files).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
    /// Whether an active public share exists for this file
    /// (denormalized read-optimization flag).
    pub is_public: bool,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file content was last modified.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension with leading dot (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        let name = &self.original_name;
        name.rfind('.')
            .filter(|&pos| pos > 0 && pos + 1 < name.len())
            .map(|pos| name[pos..].to_lowercase())
    }

    /// Version identity presented to the document editor; changes on every
    /// successful save so the editor's cached copy is invalidated.
    pub fn document_key(&self) -> String {
        format!("{}_{}", self.id, self.updated_at.timestamp_millis())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Display name.
    pub name: String,
    /// Original upload name.
    pub original_name: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Object-store key.
    pub object_key: String,
    /// Containing folder (None for root).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn file(name: &str) -> File {
        File {
            id: Uuid::new_v4(),
            name: name.to_string(),
            original_name: name.to_string(),
            mime_type: "application/octet-stream".to_string(),
            size_bytes: 1,
            object_key: "k".to_string(),
            folder_id: None,
            owner_id: Uuid::new_v4(),
            is_public: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(file("Report.DOCX").extension().as_deref(), Some(".docx"));
        assert_eq!(file("archive.tar.gz").extension().as_deref(), Some(".gz"));
        assert_eq!(file("README").extension(), None);
        assert_eq!(file(".bashrc").extension(), None);
        assert_eq!(file("noext.").extension(), None);
    }

    #[test]
    fn test_document_key_tracks_modification() {
        let mut f = file("a.docx");
        f.updated_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let before = f.document_key();
        f.updated_at = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
        assert_ne!(before, f.document_key());
        assert!(before.starts_with(&f.id.to_string()));
    }
}
