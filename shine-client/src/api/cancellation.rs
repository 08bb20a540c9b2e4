//! `/cancellations` endpoints

use shared::models::{
    Cancellation, CancellationCreate, CancellationFilter, CancellationUpdate, ProcessRefund,
};

use super::{delete_one, fetch_one, fetch_page, post_one, put_one};
use crate::ClientResult;
use crate::http::HttpClient;

const BASE: &str = "cancellations";

pub async fn list<C: HttpClient>(
    client: &C,
    filter: &CancellationFilter,
) -> ClientResult<Vec<Cancellation>> {
    Ok(fetch_page(client, BASE, &filter.to_query()).await?.items)
}

pub async fn get<C: HttpClient>(client: &C, id: &str) -> ClientResult<Cancellation> {
    fetch_one(client, &format!("{BASE}/{id}")).await
}

pub async fn create<C: HttpClient>(
    client: &C,
    form: &CancellationCreate,
) -> ClientResult<Cancellation> {
    post_one(client, BASE, form).await
}

pub async fn update<C: HttpClient>(
    client: &C,
    id: &str,
    patch: &CancellationUpdate,
) -> ClientResult<Cancellation> {
    put_one(client, &format!("{BASE}/{id}"), patch).await
}

pub async fn process_refund<C: HttpClient>(
    client: &C,
    id: &str,
    payload: &ProcessRefund,
) -> ClientResult<Cancellation> {
    put_one(client, &format!("{BASE}/{id}/refund"), payload).await
}

pub async fn delete<C: HttpClient>(client: &C, id: &str) -> ClientResult<()> {
    delete_one(client, &format!("{BASE}/{id}")).await
}
