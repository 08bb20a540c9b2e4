//! Reschedule request store

use chrono::{DateTime, Utc};
use shared::filter::{RescheduleTab, filter_items};
use shared::models::{
    RescheduleAction, RescheduleCancel, RescheduleFilter, RescheduleRequest,
    RescheduleRequestCreate, RescheduleRequestUpdate, RescheduleResponse, RescheduleStatus,
};
use tokio_util::sync::CancellationToken;

use super::{RequestStatus, find_by_id, remove_by_id, replace_by_id};
use crate::api::reschedule as api;
use crate::http::HttpClient;
use crate::notify::{Notifier, Toast, TracingNotifier};
use crate::ClientError;

/// Session cache of reschedule requests
pub struct RescheduleStore<C, N = TracingNotifier> {
    client: C,
    notifier: N,
    scope: CancellationToken,
    status: RequestStatus,
    requests: Vec<RescheduleRequest>,
    selected: Option<RescheduleRequest>,
    filter: RescheduleFilter,
}

impl<C: HttpClient, N: Notifier> RescheduleStore<C, N> {
    pub fn new(client: C, notifier: N) -> Self {
        Self {
            client,
            notifier,
            scope: CancellationToken::new(),
            status: RequestStatus::default(),
            requests: Vec::new(),
            selected: None,
            filter: RescheduleFilter::default(),
        }
    }

    /// Tie in-flight calls to `scope`; cancelling it drops their responses
    pub fn with_scope(mut self, scope: CancellationToken) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    pub fn requests(&self) -> &[RescheduleRequest] {
        &self.requests
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error.as_deref()
    }

    pub fn filter(&self) -> &RescheduleFilter {
        &self.filter
    }

    pub fn selected(&self) -> Option<&RescheduleRequest> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, id: &str) -> Option<&RescheduleRequest> {
        self.selected = find_by_id(&self.requests, id).cloned();
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn get(&self, id: &str) -> Option<&RescheduleRequest> {
        find_by_id(&self.requests, id)
    }

    pub fn pending(&self) -> Vec<RescheduleRequest> {
        self.by_status(RescheduleStatus::Pending)
    }

    pub fn by_status(&self, status: RescheduleStatus) -> Vec<RescheduleRequest> {
        filter_items(&self.requests, |r| r.status == status)
    }

    pub fn view(&self, tab: RescheduleTab) -> Vec<RescheduleRequest> {
        filter_items(&self.requests, |r| tab.matches(r))
    }

    // ========== Fetch ==========

    /// Replace the list with the server's result for `filter`
    pub async fn fetch_requests(&mut self, filter: RescheduleFilter) -> bool {
        let fetched = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to load reschedule requests",
                api::list(&self.client, &filter),
            )
            .await;
        match fetched {
            Some(requests) => {
                tracing::debug!(count = requests.len(), "reschedule requests loaded");
                self.requests = requests;
                self.filter = filter;
                true
            }
            None => false,
        }
    }

    /// Re-run the last fetch (the error panel's retry button)
    pub async fn refresh(&mut self) -> bool {
        let filter = self.filter.clone();
        self.fetch_requests(filter).await
    }

    pub async fn fetch_by_company(&mut self, company_id: &str) -> bool {
        self.fetch_requests(RescheduleFilter::by_company(company_id)).await
    }

    pub async fn fetch_by_customer(&mut self, customer_id: &str) -> bool {
        self.fetch_requests(RescheduleFilter::by_customer(customer_id)).await
    }

    pub async fn fetch_by_professional(&mut self, professional_id: &str) -> bool {
        self.fetch_requests(RescheduleFilter::by_professional(professional_id))
            .await
    }

    pub async fn fetch_by_team(&mut self, team_id: &str) -> bool {
        self.fetch_requests(RescheduleFilter::by_team(team_id)).await
    }

    pub async fn fetch_by_status(&mut self, status: RescheduleStatus) -> bool {
        self.fetch_requests(RescheduleFilter::by_status(status)).await
    }

    pub async fn fetch_by_date_range(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.fetch_requests(RescheduleFilter::by_date_range(from, to)).await
    }

    // ========== Mutations ==========

    pub async fn create_request(
        &mut self,
        form: RescheduleRequestCreate,
    ) -> Option<RescheduleRequest> {
        const TITLE: &str = "Failed to create reschedule request";
        if let Err(err) = form.validate() {
            self.status.fail(&self.notifier, TITLE, err.into());
            return None;
        }

        let created = self
            .status
            .settle(&self.notifier, &self.scope, TITLE, api::create(&self.client, &form))
            .await?;
        tracing::info!(id = %created.id, "reschedule request created");
        self.requests.push(created.clone());
        self.notifier
            .notify(Toast::success("Reschedule request created"));
        Some(created)
    }

    pub async fn update_request(
        &mut self,
        id: &str,
        patch: RescheduleRequestUpdate,
    ) -> Option<RescheduleRequest> {
        const TITLE: &str = "Failed to update reschedule request";
        if let Err(err) = patch.validate(find_by_id(&self.requests, id)) {
            self.status.fail(&self.notifier, TITLE, err.into());
            return None;
        }
        let updated = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                TITLE,
                api::update(&self.client, id, &patch),
            )
            .await?;
        self.apply(updated.clone());
        self.notifier
            .notify(Toast::success("Reschedule request updated"));
        Some(updated)
    }

    /// Approve or reject a pending request
    pub async fn respond_to_request(
        &mut self,
        id: &str,
        response: RescheduleResponse,
    ) -> Option<RescheduleRequest> {
        const TITLE: &str = "Failed to respond to reschedule request";
        if let Err(err) = response.validate() {
            self.status.fail(&self.notifier, TITLE, err.into());
            return None;
        }
        if let Err(err) = self.guard(id, response.status.into()) {
            self.status.fail(&self.notifier, TITLE, err);
            return None;
        }

        let updated = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                TITLE,
                api::respond(&self.client, id, &response),
            )
            .await?;
        tracing::info!(id, status = %updated.status, "reschedule request answered");
        self.apply(updated.clone());
        self.notifier.notify(Toast::success(match updated.status {
            RescheduleStatus::Approved => "Reschedule request approved",
            _ => "Reschedule request rejected",
        }));
        Some(updated)
    }

    pub async fn cancel_request(
        &mut self,
        id: &str,
        note: Option<String>,
    ) -> Option<RescheduleRequest> {
        const TITLE: &str = "Failed to cancel reschedule request";
        if let Err(err) = self.guard(id, RescheduleAction::Cancel) {
            self.status.fail(&self.notifier, TITLE, err);
            return None;
        }

        let payload = RescheduleCancel { note };
        let updated = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                TITLE,
                api::cancel(&self.client, id, &payload),
            )
            .await?;
        self.apply(updated.clone());
        self.notifier
            .notify(Toast::success("Reschedule request cancelled"));
        Some(updated)
    }

    /// Delete on the backend, then drop the entry if cached
    pub async fn delete_request(&mut self, id: &str) -> bool {
        let deleted = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to delete reschedule request",
                api::delete(&self.client, id),
            )
            .await;
        if deleted.is_none() {
            return false;
        }
        if !remove_by_id(&mut self.requests, id) {
            tracing::debug!(id, "deleted reschedule request was not cached");
        }
        if self.selected.as_ref().is_some_and(|s| s.id == id) {
            self.selected = None;
        }
        self.notifier
            .notify(Toast::success("Reschedule request deleted"));
        true
    }

    /// Ask the backend to notify the involved parties
    pub async fn send_notification(&mut self, id: &str) -> Option<RescheduleRequest> {
        let updated = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to send notification",
                api::notify(&self.client, id),
            )
            .await?;
        self.apply(updated.clone());
        self.notifier.notify(Toast::success("Notification sent"));
        Some(updated)
    }

    /// Refuse actions on settled requests before calling the backend.
    /// Uncached requests are left to the backend to judge.
    fn guard(&self, id: &str, action: RescheduleAction) -> Result<(), ClientError> {
        match find_by_id(&self.requests, id) {
            Some(request) => request.status.apply(action).map(|_| ()).map_err(Into::into),
            None => Ok(()),
        }
    }

    fn apply(&mut self, updated: RescheduleRequest) {
        if self.selected.as_ref().is_some_and(|s| s.id == updated.id) {
            self.selected = Some(updated.clone());
        }
        replace_by_id(&mut self.requests, updated);
    }
}
