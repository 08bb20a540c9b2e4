//! `/reschedule-requests` endpoints

use shared::models::{
    RescheduleCancel, RescheduleFilter, RescheduleRequest, RescheduleRequestCreate,
    RescheduleRequestUpdate, RescheduleResponse,
};
use shared::response::Envelope;

use super::{delete_one, fetch_one, fetch_page, post_one, put_one};
use crate::ClientResult;
use crate::http::HttpClient;

const BASE: &str = "reschedule-requests";

pub async fn list<C: HttpClient>(
    client: &C,
    filter: &RescheduleFilter,
) -> ClientResult<Vec<RescheduleRequest>> {
    Ok(fetch_page(client, BASE, &filter.to_query()).await?.items)
}

pub async fn get<C: HttpClient>(client: &C, id: &str) -> ClientResult<RescheduleRequest> {
    fetch_one(client, &format!("{BASE}/{id}")).await
}

pub async fn create<C: HttpClient>(
    client: &C,
    form: &RescheduleRequestCreate,
) -> ClientResult<RescheduleRequest> {
    post_one(client, BASE, form).await
}

pub async fn update<C: HttpClient>(
    client: &C,
    id: &str,
    patch: &RescheduleRequestUpdate,
) -> ClientResult<RescheduleRequest> {
    put_one(client, &format!("{BASE}/{id}"), patch).await
}

pub async fn respond<C: HttpClient>(
    client: &C,
    id: &str,
    response: &RescheduleResponse,
) -> ClientResult<RescheduleRequest> {
    put_one(client, &format!("{BASE}/{id}/respond"), response).await
}

pub async fn cancel<C: HttpClient>(
    client: &C,
    id: &str,
    payload: &RescheduleCancel,
) -> ClientResult<RescheduleRequest> {
    put_one(client, &format!("{BASE}/{id}/cancel"), payload).await
}

pub async fn delete<C: HttpClient>(client: &C, id: &str) -> ClientResult<()> {
    delete_one(client, &format!("{BASE}/{id}")).await
}

/// Some deployments answer the notify call with an empty body; the stamped
/// request is then read back.
pub async fn notify<C: HttpClient>(client: &C, id: &str) -> ClientResult<RescheduleRequest> {
    let envelope: Option<Envelope<RescheduleRequest>> =
        client.post_empty(&format!("{BASE}/{id}/notify")).await?;
    match envelope {
        Some(envelope) => Ok(envelope.into_inner()),
        None => get(client, id).await,
    }
}
