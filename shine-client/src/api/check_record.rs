//! `/check-records` endpoints

use shared::models::{CheckInPayload, CheckOutPayload, CheckRecord, CheckRecordFilter};

use super::{delete_one, fetch_page, post_one, put_one};
use crate::ClientResult;
use crate::http::HttpClient;

const BASE: &str = "check-records";

pub async fn list<C: HttpClient>(
    client: &C,
    filter: &CheckRecordFilter,
) -> ClientResult<Vec<CheckRecord>> {
    Ok(fetch_page(client, BASE, &filter.to_query()).await?.items)
}

pub async fn check_in<C: HttpClient>(
    client: &C,
    payload: &CheckInPayload,
) -> ClientResult<CheckRecord> {
    post_one(client, &format!("{BASE}/check-in"), payload).await
}

pub async fn check_out<C: HttpClient>(
    client: &C,
    id: &str,
    payload: &CheckOutPayload,
) -> ClientResult<CheckRecord> {
    put_one(client, &format!("{BASE}/{id}/check-out"), payload).await
}

pub async fn delete<C: HttpClient>(client: &C, id: &str) -> ClientResult<()> {
    delete_one(client, &format!("{BASE}/{id}")).await
}
