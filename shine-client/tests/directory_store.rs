//! DirectoryStore filtering modes and the shared cache

mod common;

use common::{FakeBackend, company_json};
use shine_client::shared::filter::ListQuery;
use shine_client::shared::models::{ActiveStatus, Company, ResourceKind};
use shine_client::{
    DirectoryStore, FilterMode, SharedCache, ToastKind, ToastQueue, shared_cache,
};

const PATH: &str = "companies";

type CompanyStore = DirectoryStore<Company, FakeBackend, ToastQueue>;

fn store(backend: &FakeBackend, cache: &SharedCache, threshold: u64) -> (CompanyStore, ToastQueue) {
    let toasts = ToastQueue::new();
    let store = DirectoryStore::new(backend.clone(), toasts.clone(), cache.clone(), threshold);
    (store, toasts)
}

fn names(store: &CompanyStore) -> Vec<&str> {
    store.items().iter().map(|c| c.name.as_str()).collect()
}

fn seed_companies(backend: &FakeBackend, count: usize) {
    let companies = (1..=count)
        .map(|i| company_json(&format!("co-{i}"), &format!("Company {i}"), "active"))
        .collect();
    backend.seed(PATH, companies);
}

#[tokio::test]
async fn test_small_collection_filters_locally() {
    let backend = FakeBackend::new();
    backend.seed(
        PATH,
        vec![
            company_json("co-1", "Beta Clean", "active"),
            company_json("co-2", "alpha Homes", "active"),
            company_json("co-3", "Gamma Office", "inactive"),
        ],
    );
    let cache = shared_cache();
    let (mut store, _toasts) = store(&backend, &cache, 10);

    assert!(store.load().await);
    assert_eq!(store.mode(), FilterMode::ClientSide);
    assert_eq!(names(&store), ["alpha Homes", "Beta Clean", "Gamma Office"]);

    let probe = backend.last_call().unwrap();
    assert!(probe.query.contains(&("pageSize".to_string(), "10".to_string())));

    assert!(store.set_query(ListQuery::default().with_search("gam")).await);
    assert_eq!(names(&store), ["Gamma Office"]);

    assert!(store.set_query(ListQuery::default().with_status(ActiveStatus::Active)).await);
    assert_eq!(store.page().total_items, 2);

    assert_eq!(backend.calls_to("GET", PATH), 1);
}

#[tokio::test]
async fn test_large_collection_queries_server() {
    let backend = FakeBackend::new();
    seed_companies(&backend, 5);
    let cache = shared_cache();
    let (mut store, _toasts) = store(&backend, &cache, 2);

    assert!(store.load().await);
    assert_eq!(store.mode(), FilterMode::ServerSide);
    assert_eq!(store.items().len(), 5);
    assert_eq!(store.page().total_items, 5);
    assert_eq!(backend.calls_to("GET", PATH), 2);

    assert!(store.set_query(ListQuery::default().with_search("Company 5")).await);
    assert_eq!(names(&store), ["Company 5"]);
    let search = backend.last_call().unwrap();
    assert!(search.query.contains(&("search".to_string(), "Company 5".to_string())));
    assert_eq!(backend.calls_to("GET", PATH), 3);

    // answered from the cache
    assert!(store.set_query(ListQuery::default()).await);
    assert_eq!(store.items().len(), 5);
    assert_eq!(backend.calls_to("GET", PATH), 3);

    assert!(store.refresh().await);
    assert_eq!(store.mode(), FilterMode::ServerSide);
    assert_eq!(backend.calls_to("GET", PATH), 5);
}

#[tokio::test]
async fn test_cache_is_shared_between_stores() {
    let backend = FakeBackend::new();
    seed_companies(&backend, 3);
    let cache = shared_cache();
    let (mut first, _) = store(&backend, &cache, 10);
    let (second, _) = store(&backend, &cache, 10);

    assert!(second.get("co-2").is_none());
    assert!(first.load().await);
    assert_eq!(second.get("co-2").unwrap().name, "Company 2");

    {
        let mut guard = cache.lock().unwrap();
        assert_eq!(guard.entity_count(ResourceKind::Company), 3);
        guard.invalidate_entity(ResourceKind::Company, "co-2");
    }
    assert!(second.get("co-2").is_none());

    // the full set lost a member, so the next load sizes the collection again
    assert!(first.load().await);
    assert_eq!(first.items().len(), 3);
    assert_eq!(backend.calls_to("GET", PATH), 2);
}

#[tokio::test]
async fn test_failed_load_reports_once() {
    let backend = FakeBackend::new();
    seed_companies(&backend, 3);
    backend.fail_path(PATH);
    let cache = shared_cache();
    let (mut store, toasts) = store(&backend, &cache, 10);

    assert!(!store.load().await);
    assert_eq!(store.mode(), FilterMode::Undecided);
    assert!(store.items().is_empty());
    assert!(store.error().is_some());
    let toast = toasts.drain().pop().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.title, "Failed to load companies");

    backend.heal();
    assert!(store.load().await);
    assert!(store.error().is_none());
}
