//! REST endpoint wrappers
//!
//! Thin typed functions over [`HttpClient`](crate::http::HttpClient). List
//! responses are normalized to [`Page`](shared::Page) here, so nothing past
//! this layer sees the backend's envelope variants.

pub mod cancellation;
pub mod check_record;
pub mod directory;
pub mod reschedule;

use serde::de::DeserializeOwned;
use shared::response::Envelope;
use shared::{ListEnvelope, Page};

use crate::ClientResult;
use crate::http::{HttpClient, Query};

pub(crate) async fn fetch_page<T, C>(client: &C, path: &str, query: &Query) -> ClientResult<Page<T>>
where
    T: DeserializeOwned + Send,
    C: HttpClient,
{
    let envelope: ListEnvelope<T> = client.get(path, query).await?;
    Ok(envelope.into())
}

pub(crate) async fn fetch_one<T, C>(client: &C, path: &str) -> ClientResult<T>
where
    T: DeserializeOwned + Send,
    C: HttpClient,
{
    let envelope: Envelope<T> = client.get(path, &[]).await?;
    Ok(envelope.into_inner())
}

pub(crate) async fn post_one<T, B, C>(client: &C, path: &str, body: &B) -> ClientResult<T>
where
    T: DeserializeOwned + Send,
    B: serde::Serialize + Sync,
    C: HttpClient,
{
    let envelope: Envelope<T> = client.post(path, body).await?;
    Ok(envelope.into_inner())
}

pub(crate) async fn put_one<T, B, C>(client: &C, path: &str, body: &B) -> ClientResult<T>
where
    T: DeserializeOwned + Send,
    B: serde::Serialize + Sync,
    C: HttpClient,
{
    let envelope: Envelope<T> = client.put(path, body).await?;
    Ok(envelope.into_inner())
}

pub(crate) async fn delete_one<C: HttpClient>(client: &C, path: &str) -> ClientResult<()> {
    let _: serde_json::Value = client.delete(path).await?;
    Ok(())
}
