//! Shine Client - REST client and session stores for the Shine admin console
//!
//! Stores keep the per-page lists (reschedule requests, cancellations,
//! check records, directory pages) in sync with the backend and report
//! failures through a [`Notifier`].

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod lookup;
pub mod notify;
pub mod store;

pub use cache::{DirectoryCache, SharedCache, shared_cache};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use lookup::{FormLookups, SettledLookups, load_lookups, load_lookups_settled};
pub use notify::{Notifier, Toast, ToastKind, ToastQueue, TracingNotifier};
pub use store::{
    CancellationStore, CheckRecordStore, DirectoryStore, FilterMode, RequestStatus,
    RescheduleStore,
};

// Re-export shared types for convenience
pub use shared;
