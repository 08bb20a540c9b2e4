//! Per-resource stores
//!
//! Each store is the session cache of one resource list. The backend is
//! the source of truth: state changes only after a call succeeds, and a
//! failed call leaves the previous state in place.
//!
//! Failures follow one pattern everywhere: the message lands in the
//! store's `error` slot, one error toast goes out, and the error is logged.
//! Nothing is returned as `Err`; callers check the `Option`/`bool` result.

mod cancellation;
mod check_record;
mod directory;
mod reschedule;

pub use cancellation::CancellationStore;
pub use check_record::CheckRecordStore;
pub use directory::{DirectoryStore, FilterMode};
pub use reschedule::RescheduleStore;

use std::future::Future;

use shared::models::Identified;
use tokio_util::sync::CancellationToken;

use crate::notify::{Notifier, Toast};
use crate::{ClientError, ClientResult};

/// Loading flag and last error of a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    /// Record a failure and surface it
    pub(crate) fn fail<N: Notifier>(&mut self, notifier: &N, title: &str, err: ClientError) {
        let message = err.to_string();
        tracing::error!(error = %message, "{title}");
        notifier.notify(Toast::error(title, message.clone()));
        self.error = Some(message);
    }

    /// Await `fut` within `scope`, applying the failure pattern on error.
    ///
    /// If the scope is cancelled first the response is dropped: no state
    /// change and no toast.
    pub(crate) async fn settle<T, N, F>(
        &mut self,
        notifier: &N,
        scope: &CancellationToken,
        title: &str,
        fut: F,
    ) -> Option<T>
    where
        N: Notifier,
        F: Future<Output = ClientResult<T>>,
    {
        self.loading = true;
        let result = tokio::select! {
            biased;
            _ = scope.cancelled() => Err(ClientError::Cancelled),
            result = fut => result,
        };
        self.loading = false;

        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(ClientError::Cancelled) => {
                tracing::debug!("{title}: scope cancelled, response dropped");
                None
            }
            Err(err) => {
                self.fail(notifier, title, err);
                None
            }
        }
    }
}

/// Replace the entry with the same id, if cached
pub(crate) fn replace_by_id<T: Identified>(items: &mut [T], entity: T) -> bool {
    match items.iter_mut().find(|item| item.id() == entity.id()) {
        Some(slot) => {
            *slot = entity;
            true
        }
        None => false,
    }
}

/// Replace the cached entry or append a new one
pub(crate) fn upsert<T: Identified>(items: &mut Vec<T>, entity: T) {
    if let Some(slot) = items.iter_mut().find(|item| item.id() == entity.id()) {
        *slot = entity;
    } else {
        items.push(entity);
    }
}

/// Drop the entry with `id`; a missing id is a no-op
pub(crate) fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

pub(crate) fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}
