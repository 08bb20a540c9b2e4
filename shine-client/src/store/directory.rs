//! Filtered directory list pages (companies, professionals, customers, users)
//!
//! One rule decides where filtering happens. The first load asks for a
//! page as large as the configured threshold; if the whole collection fits,
//! it is kept and every later query is answered locally, otherwise each
//! query goes to the server.

use serde::de::DeserializeOwned;
use shared::Page;
use shared::filter::ListQuery;
use shared::models::DirectoryEntry;
use tokio_util::sync::CancellationToken;

use super::RequestStatus;
use crate::api::directory as api;
use crate::cache::{self, SharedCache};
use crate::http::HttpClient;
use crate::notify::{Notifier, TracingNotifier};

const ALL_KEY: &str = "*";

/// Where list queries are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Collection size not known yet
    #[default]
    Undecided,
    ClientSide,
    ServerSide,
}

pub struct DirectoryStore<T, C, N = TracingNotifier> {
    client: C,
    notifier: N,
    scope: CancellationToken,
    status: RequestStatus,
    cache: SharedCache,
    threshold: u64,
    mode: FilterMode,
    query: ListQuery,
    page: Page<T>,
}

impl<T, C, N> DirectoryStore<T, C, N>
where
    T: DirectoryEntry + DeserializeOwned + Clone + Send + Sync + 'static,
    C: HttpClient,
    N: Notifier,
{
    pub fn new(client: C, notifier: N, cache: SharedCache, threshold: u64) -> Self {
        Self {
            client,
            notifier,
            scope: CancellationToken::new(),
            status: RequestStatus::default(),
            cache,
            threshold: threshold.max(1),
            mode: FilterMode::Undecided,
            query: ListQuery::default(),
            page: Page::single(Vec::new()),
        }
    }

    pub fn with_scope(mut self, scope: CancellationToken) -> Self {
        self.scope = scope;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.page.items
    }

    pub fn page(&self) -> &Page<T> {
        &self.page
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        cache::lock(&self.cache).get::<T>(id)
    }

    /// Change search/filter/page state and reload
    pub async fn set_query(&mut self, query: ListQuery) -> bool {
        self.query = query;
        self.load().await
    }

    /// Answer the current query, from the cache when possible
    pub async fn load(&mut self) -> bool {
        loop {
            match self.mode {
                FilterMode::Undecided => {
                    if !self.probe().await {
                        return false;
                    }
                }
                FilterMode::ClientSide => {
                    let all = cache::lock(&self.cache).page::<T>(ALL_KEY);
                    match all {
                        Some(all) => {
                            self.page = local_page(&all.items, &self.query);
                            return true;
                        }
                        // evicted by someone else; size the collection again
                        None => self.mode = FilterMode::Undecided,
                    }
                }
                FilterMode::ServerSide => return self.fetch_server_page().await,
            }
        }
    }

    /// Drop cached entries of this kind and load again
    pub async fn refresh(&mut self) -> bool {
        cache::lock(&self.cache).invalidate(T::KIND);
        self.mode = FilterMode::Undecided;
        self.load().await
    }

    async fn probe(&mut self) -> bool {
        let probe = ListQuery {
            page_size: u32::try_from(self.threshold).unwrap_or(u32::MAX),
            ..ListQuery::default()
        };
        let title = format!("Failed to load {}", T::KIND.path());
        let Some(page) = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                &title,
                api::list::<T, C>(&self.client, &probe),
            )
            .await
        else {
            return false;
        };

        let fits = page.total_items <= self.threshold && !page.has_more();
        let mut guard = cache::lock(&self.cache);
        if fits {
            guard.store_page(ALL_KEY, &page);
            self.mode = FilterMode::ClientSide;
        } else {
            guard.store_page(&probe.cache_key(), &page);
            self.mode = FilterMode::ServerSide;
        }
        tracing::debug!(
            kind = ?T::KIND,
            total = page.total_items,
            mode = ?self.mode,
            "directory filter mode decided"
        );
        true
    }

    async fn fetch_server_page(&mut self) -> bool {
        let key = self.query.cache_key();
        if let Some(page) = cache::lock(&self.cache).page::<T>(&key) {
            self.page = page;
            return true;
        }

        let title = format!("Failed to load {}", T::KIND.path());
        let Some(page) = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                &title,
                api::list::<T, C>(&self.client, &self.query),
            )
            .await
        else {
            return false;
        };
        cache::lock(&self.cache).store_page(&key, &page);
        self.page = page;
        true
    }
}

/// Filter, sort and slice the full collection
fn local_page<T: DirectoryEntry + Clone>(all: &[T], query: &ListQuery) -> Page<T> {
    let matched = query.apply(all);
    let total = matched.len() as u64;
    let page_size = query.page_size.max(1);
    let page_count = (total.div_ceil(page_size as u64) as u32).max(1);
    let page = query.page.clamp(1, page_count);
    let items = matched
        .into_iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();
    Page::new(items, Some(page), Some(page_size), Some(total), Some(page_count))
}
