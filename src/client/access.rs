//! Document Access Control
//!
//! Staged editing of a document's access policy. The controller keeps two
//! views: the baseline, which is the document as the backend last
//! confirmed it, and the staged policy the user is editing. Edits never
//! touch the baseline. A successful save commits the backend's response
//! as the new baseline; a failed save restores the staged policy from the
//! baseline, so the controller never presents an unconfirmed edit as
//! current state.

use tokio::sync::watch;

use crate::client::api::ApiClient;
use crate::shared::document::{AccessMode, AccessPolicy, Document, UpdateDocumentRequest};
use crate::shared::error::ClientError;

/// Staged access policy editor, one document at a time
pub struct AccessController {
    api: ApiClient,
    baseline: Option<Document>,
    policy: watch::Sender<AccessPolicy>,
}

impl AccessController {
    pub fn new(api: ApiClient) -> Self {
        let (policy, _) = watch::channel(AccessPolicy::default());
        Self {
            api,
            baseline: None,
            policy,
        }
    }

    /// Fetch a document and derive the staged policy from it
    pub async fn load(&mut self, document_id: &str) -> Result<Document, ClientError> {
        let document = self.api.get_document(document_id).await?;
        self.adopt(document.clone());
        tracing::info!("[Access] loaded document {}", document_id);
        Ok(document)
    }

    /// Adopt an already fetched document without another round trip
    pub fn load_document(&mut self, document: Document) {
        self.adopt(document);
    }

    /// The document as the backend last confirmed it
    pub fn baseline(&self) -> Option<&Document> {
        self.baseline.as_ref()
    }

    /// Watch the staged policy
    pub fn policy(&self) -> watch::Receiver<AccessPolicy> {
        self.policy.subscribe()
    }

    /// Snapshot of the staged policy
    pub fn staged(&self) -> AccessPolicy {
        self.policy.borrow().clone()
    }

    /// Stage an access mode change
    ///
    /// The staged user selection is kept either way, so switching to
    /// everyone and back does not lose the picked users.
    pub fn set_mode(&self, mode: AccessMode) {
        self.policy.send_if_modified(|policy| {
            if policy.mode == mode {
                false
            } else {
                policy.mode = mode;
                true
            }
        });
    }

    /// Stage a new user selection
    ///
    /// Duplicates are dropped, keeping first occurrence order. An empty
    /// selection is legal and means owner-only access under `Selected`;
    /// it is never coerced into public visibility.
    pub fn stage_user_selection(&self, user_ids: Vec<i64>) {
        let mut deduped = Vec::with_capacity(user_ids.len());
        for id in user_ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        self.policy
            .send_modify(|policy| policy.allowed_user_ids = deduped);
    }

    /// Whether the staged policy differs from the baseline
    pub fn has_staged_changes(&self) -> bool {
        match &self.baseline {
            Some(document) => *self.policy.borrow() != document.access_policy(),
            None => false,
        }
    }

    /// Commit the staged policy
    ///
    /// Mode everyone maps to the public flag with an empty allowed list;
    /// mode selected sends the staged selection as-is. The response
    /// document is authoritative: on success it replaces both the baseline
    /// and the staged policy, including any normalization the backend
    /// applied. On failure the baseline is kept and the stage is restored
    /// from it, and the error is surfaced to the caller.
    pub async fn save(&mut self) -> Result<Document, ClientError> {
        let document_id = match &self.baseline {
            Some(document) => document.id.clone(),
            None => return Err(ClientError::NoDocument),
        };

        let staged = self.staged();
        let is_public = staged.is_public();
        let allowed_users = if is_public {
            Vec::new()
        } else {
            staged.allowed_user_ids
        };
        let request = UpdateDocumentRequest::access(is_public, allowed_users);

        match self.api.update_document(&document_id, &request).await {
            Ok(updated) => {
                tracing::info!("[Access] saved policy for document {}", document_id);
                self.adopt(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(
                    "[Access] save failed for document {}, discarding stage: {}",
                    document_id,
                    e
                );
                if let Some(document) = &self.baseline {
                    self.policy.send_replace(document.access_policy());
                }
                Err(e)
            }
        }
    }

    fn adopt(&mut self, document: Document) {
        self.policy.send_replace(document.access_policy());
        self.baseline = Some(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::Config;
    use crate::client::session::Session;
    use std::sync::Arc;

    fn controller() -> AccessController {
        let config = Config::new().with_base_url("http://localhost:1/api");
        let api = ApiClient::new(config, Arc::new(Session::in_memory())).unwrap();
        AccessController::new(api)
    }

    fn document(is_public: bool, allowed_users: Vec<i64>) -> Document {
        Document {
            id: "d1".to_string(),
            filename: "stored.pdf".to_string(),
            original_filename: "report.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            file_size: 1024,
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
    fn test_load_document_derives_staged_policy() {
        let mut controller = controller();
        controller.load_document(document(false, vec![2, 3]));

        let staged = controller.staged();
        assert_eq!(staged.mode, AccessMode::Selected);
        assert_eq!(staged.allowed_user_ids, vec![2, 3]);
        assert!(!controller.has_staged_changes());
    }

    #[test]
    fn test_set_mode_keeps_selection() {
        let mut controller = controller();
        controller.load_document(document(false, vec![2, 3]));

        controller.set_mode(AccessMode::Everyone);
        controller.set_mode(AccessMode::Selected);

        assert_eq!(controller.staged().allowed_user_ids, vec![2, 3]);
    }

    #[test]
    fn test_stage_user_selection_dedupes() {
        let mut controller = controller();
        controller.load_document(document(false, vec![]));

        controller.stage_user_selection(vec![9, 9, 7, 9]);
        assert_eq!(controller.staged().allowed_user_ids, vec![9, 7]);
    }

    #[test]
    fn test_empty_selection_stays_selected() {
        let mut controller = controller();
        controller.load_document(document(false, vec![2]));

        controller.stage_user_selection(vec![]);

        let staged = controller.staged();
        assert_eq!(staged.mode, AccessMode::Selected);
        assert!(staged.allowed_user_ids.is_empty());
        assert!(!staged.is_public());
    }

    #[test]
    fn test_has_staged_changes_tracks_edits() {
        let mut controller = controller();
        controller.load_document(document(false, vec![2]));
        assert!(!controller.has_staged_changes());

        controller.set_mode(AccessMode::Everyone);
        assert!(controller.has_staged_changes());

        controller.set_mode(AccessMode::Selected);
        assert!(!controller.has_staged_changes());
    }

    #[test]
    fn test_policy_watch_observes_staging() {
        let mut controller = controller();
        let policy = controller.policy();
        controller.load_document(document(false, vec![2]));

        controller.stage_user_selection(vec![4]);
        assert_eq!(policy.borrow().allowed_user_ids, vec![4]);
    }

    #[tokio::test]
    async fn test_save_without_load_is_rejected() {
        let mut controller = controller();
        let error = controller.save().await.unwrap_err();
        assert!(matches!(error, ClientError::NoDocument));
    }

    #[test]
    fn test_edits_never_touch_baseline() {
        let mut controller = controller();
        controller.load_document(document(false, vec![2]));

        controller.set_mode(AccessMode::Everyone);
        controller.stage_user_selection(vec![8]);

        let baseline = controller.baseline().unwrap();
        assert!(!baseline.is_public);
        assert_eq!(baseline.allowed_users, vec![2]);
    }
}
