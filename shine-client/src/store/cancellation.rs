//! Cancellation / refund store

use shared::filter::filter_items;
use shared::models::{
    Cancellation, CancellationCreate, CancellationFilter, CancellationUpdate, ProcessRefund,
    RefundStatus,
};
use tokio_util::sync::CancellationToken;

use super::{RequestStatus, find_by_id, remove_by_id, replace_by_id};
use crate::api::cancellation as api;
use crate::http::HttpClient;
use crate::notify::{Notifier, Toast, TracingNotifier};

/// Session cache of cancellations
pub struct CancellationStore<C, N = TracingNotifier> {
    client: C,
    notifier: N,
    scope: CancellationToken,
    status: RequestStatus,
    cancellations: Vec<Cancellation>,
    filter: CancellationFilter,
}

impl<C: HttpClient, N: Notifier> CancellationStore<C, N> {
    pub fn new(client: C, notifier: N) -> Self {
        Self {
            client,
            notifier,
            scope: CancellationToken::new(),
            status: RequestStatus::default(),
            cancellations: Vec::new(),
            filter: CancellationFilter::default(),
        }
    }

    pub fn with_scope(mut self, scope: CancellationToken) -> Self {
        self.scope = scope;
        self
    }

    pub fn cancellations(&self) -> &[Cancellation] {
        &self.cancellations
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Cancellation> {
        find_by_id(&self.cancellations, id)
    }

    /// Cancellations whose refund still awaits a decision
    pub fn pending_refunds(&self) -> Vec<Cancellation> {
        filter_items(&self.cancellations, |c| c.refund_status == RefundStatus::Pending)
    }

    pub async fn fetch_cancellations(&mut self, filter: CancellationFilter) -> bool {
        let fetched = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to load cancellations",
                api::list(&self.client, &filter),
            )
            .await;
        match fetched {
            Some(cancellations) => {
                self.cancellations = cancellations;
                self.filter = filter;
                true
            }
            None => false,
        }
    }

    pub async fn refresh(&mut self) -> bool {
        let filter = self.filter.clone();
        self.fetch_cancellations(filter).await
    }

    pub async fn create_cancellation(&mut self, form: CancellationCreate) -> Option<Cancellation> {
        const TITLE: &str = "Failed to create cancellation";
        if let Err(err) = form.validate() {
            self.status.fail(&self.notifier, TITLE, err.into());
            return None;
        }
        let created = self
            .status
            .settle(&self.notifier, &self.scope, TITLE, api::create(&self.client, &form))
            .await?;
        self.cancellations.push(created.clone());
        self.notifier.notify(Toast::success("Cancellation recorded"));
        Some(created)
    }

    pub async fn update_cancellation(
        &mut self,
        id: &str,
        patch: CancellationUpdate,
    ) -> Option<Cancellation> {
        let updated = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to update cancellation",
                api::update(&self.client, id, &patch),
            )
            .await?;
        replace_by_id(&mut self.cancellations, updated.clone());
        self.notifier.notify(Toast::success("Cancellation updated"));
        Some(updated)
    }

    /// Settle a pending refund. Refused locally unless the cached refund is `Pending`.
    pub async fn process_refund(
        &mut self,
        id: &str,
        payload: ProcessRefund,
    ) -> Option<Cancellation> {
        const TITLE: &str = "Failed to process refund";
        if let Some(cancellation) = find_by_id(&self.cancellations, id)
            && let Err(err) = cancellation.check_refundable()
        {
            self.status.fail(&self.notifier, TITLE, err.into());
            return None;
        }
        if let Some(amount) = payload.refund_amount
            && amount < 0.0
        {
            self.status.fail(
                &self.notifier,
                TITLE,
                shared::ValidationError::new("refundAmount", "must not be negative").into(),
            );
            return None;
        }

        let updated = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                TITLE,
                api::process_refund(&self.client, id, &payload),
            )
            .await?;
        tracing::info!(id, refund_status = %updated.refund_status, "refund processed");
        replace_by_id(&mut self.cancellations, updated.clone());
        self.notifier.notify(Toast::success("Refund processed"));
        Some(updated)
    }

    pub async fn delete_cancellation(&mut self, id: &str) -> bool {
        let deleted = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to delete cancellation",
                api::delete(&self.client, id),
            )
            .await;
        if deleted.is_none() {
            return false;
        }
        remove_by_id(&mut self.cancellations, id);
        self.notifier.notify(Toast::success("Cancellation deleted"));
        true
    }
}
