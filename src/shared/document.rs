//! Document Data Structures
//!
//! Document metadata as served by the backend, plus the access policy types
//! the client derives from it. A document is either public (every
//! authenticated user may read it) or restricted to an explicit list of
//! user IDs; the owner always has access regardless of that list.

use serde::{Deserialize, Deserializer, Serialize};

/// Document metadata returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document ID
    pub id: String,
    /// Storage filename
    pub filename: String,
    /// Filename as uploaded by the user
    pub original_filename: String,
    /// MIME type
    pub content_type: String,
    /// Size in bytes
    pub file_size: i64,
    /// Owner's user ID
    pub uploaded_by: i64,
    /// Owner's username, denormalized for display
    pub uploaded_by_username: String,
    /// Upload timestamp as emitted by the backend
    pub upload_date: String,
    /// Whether every authenticated user may read the document
    pub is_public: bool,
    /// User IDs granted access when the document is not public
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_users: Vec<i64>,
    /// Optional description
    pub description: Option<String>,
    /// Optional tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Revision counter, absent on legacy documents
    pub version: Option<i64>,
    /// Last modification timestamp, if the document was ever edited
    pub last_modified: Option<String>,
    /// Number of times the document was downloaded
    pub download_count: i64,
}

impl Document {
    /// Access mode implied by the public flag
    pub fn access_mode(&self) -> AccessMode {
        if self.is_public {
            AccessMode::Everyone
        } else {
            AccessMode::Selected
        }
    }

    /// Snapshot of the document's access policy
    ///
    /// The allowed user list is carried even for public documents so a
    /// later switch back to selected access starts from the stored list.
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy {
            mode: self.access_mode(),
            allowed_user_ids: self.allowed_users.clone(),
        }
    }
}

/// Who may read a document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Every authenticated user
    Everyone,
    /// Only the owner and the users in the allowed list
    Selected,
}

/// A document's access policy as edited by the client
///
/// An empty allowed list under `Selected` means owner-only access; it is
/// never coerced into public visibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Current access mode
    pub mode: AccessMode,
    /// User IDs granted access under `Selected`
    pub allowed_user_ids: Vec<i64>,
}

impl AccessPolicy {
    /// Whether the policy grants access to every authenticated user
    pub fn is_public(&self) -> bool {
        self.mode == AccessMode::Everyone
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            mode: AccessMode::Selected,
            allowed_user_ids: Vec::new(),
        }
    }
}

/// Body of a document update request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    /// New public flag
    pub is_public: bool,
    /// New allowed user list, cleared when the document goes public
    pub allowed_users: Vec<i64>,
    /// New description, omitted to leave it unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New tags, omitted to leave them unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateDocumentRequest {
    /// Build an update that only changes the access policy
    pub fn access(is_public: bool, allowed_users: Vec<i64>) -> Self {
        Self {
            is_public,
            allowed_users,
            description: None,
            tags: None,
        }
    }
}

/// Mongo-backed fields can come back as explicit `null` instead of being
/// omitted; treat both the same as an empty collection.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document(is_public: bool, allowed_users: Vec<i64>) -> Document {
        Document {
            id: "d1".to_string(),
            filename: "stored.pdf".to_string(),
            original_filename: "report.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            file_size: 2048,
            uploaded_by: 1,
            uploaded_by_username: "alice".to_string(),
            upload_date: "2024-09-01T10:00:00".to_string(),
            is_public,
            allowed_users,
            description: None,
            tags: Vec::new(),
            version: Some(1),
            last_modified: None,
            download_count: 0,
        }
    }

    #[test]
    fn test_access_mode_from_public_flag() {
        assert_eq!(sample_document(true, vec![]).access_mode(), AccessMode::Everyone);
        assert_eq!(sample_document(false, vec![2]).access_mode(), AccessMode::Selected);
    }

    #[test]
    fn test_access_policy_keeps_allowed_users_when_public() {
        let policy = sample_document(true, vec![2, 3]).access_policy();
        assert_eq!(policy.mode, AccessMode::Everyone);
        assert_eq!(policy.allowed_user_ids, vec![2, 3]);
    }

    #[test]
    fn test_deserialize_tolerates_null_collections() {
        let json = r#"{
            "id": "d1",
            "filename": "stored.pdf",
            "originalFilename": "report.pdf",
            "contentType": "application/pdf",
            "fileSize": 2048,
            "uploadedBy": 1,
            "uploadedByUsername": "alice",
            "uploadDate": "2024-09-01T10:00:00",
            "isPublic": false,
            "allowedUsers": null,
            "description": null,
            "version": null,
            "lastModified": null,
            "downloadCount": 3
        }"#;

        let document: Document = serde_json::from_str(json).unwrap();
        assert!(document.allowed_users.is_empty());
        assert!(document.tags.is_empty());
        assert_eq!(document.version, None);
        assert_eq!(document.download_count, 3);
    }

    #[test]
    fn test_update_request_serialization() {
        let request = UpdateDocumentRequest::access(false, vec![4, 5]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["isPublic"], false);
        assert_eq!(value["allowedUsers"], serde_json::json!([4, 5]));
        assert!(value.get("description").is_none());
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn test_access_mode_wire_names() {
        assert_eq!(serde_json::to_string(&AccessMode::Everyone).unwrap(), "\"everyone\"");
        assert_eq!(serde_json::to_string(&AccessMode::Selected).unwrap(), "\"selected\"");
    }
}
