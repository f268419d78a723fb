//! Request submission and per-owner listing.

use chrono::Utc;
use orgdesk_shared::{same_email, DeskError, DeskResult, RequestId, RequestStatus, ValidationError};

use crate::models::{ItemDraft, Request};
use crate::store::EntityStore;

impl EntityStore {
    /// Requests owned by `email` (case-insensitive), oldest first.
    pub fn requests_for(&self, email: &str) -> Vec<Request> {
        self.data
            .requests
            .iter()
            .filter(|r| same_email(&r.employee_email, email))
            .cloned()
            .collect()
    }

    pub fn list_requests(&self) -> Vec<Request> {
        self.data.requests.clone()
    }

    /// Submit a new `Pending` request for `owner_email`.
    ///
    /// Drafts with a blank name or a non-positive quantity are discarded;
    /// if nothing is left the request is refused.
    pub fn create_request(
        &mut self,
        owner_email: &str,
        kind: &str,
        items: Vec<ItemDraft>,
    ) -> DeskResult<Request> {
        let owner = self
            .find_account_by_email(owner_email)
            .ok_or_else(|| DeskError::not_found("account", owner_email))?;
        let employee_email = owner.email.clone();

        let kind = kind.trim();
        if kind.is_empty() {
            return Err(ValidationError::Required("type").into());
        }

        let items: Vec<_> = items.into_iter().filter_map(ItemDraft::into_item).collect();
        if items.is_empty() {
            return Err(ValidationError::EmptyItems.into());
        }

        let request = Request {
            id: RequestId::generate(),
            kind: kind.to_string(),
            items,
            status: RequestStatus::Pending,
            date: Utc::now(),
            employee_email,
        };
        self.data.requests.push(request.clone());
        self.commit();

        tracing::info!(
            request_id = %request.id,
            owner = %request.employee_email,
            items = request.items.len(),
            "request submitted"
        );
        Ok(request)
    }
}
