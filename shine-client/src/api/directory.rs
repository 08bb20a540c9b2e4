//! Directory endpoints: companies, customers, professionals, teams, users,
//! appointments

use serde::de::DeserializeOwned;
use shared::Page;
use shared::filter::ListQuery;
use shared::models::{ActiveStatus, Appointment, DirectoryEntry, ResourceKind};

use super::{fetch_one, fetch_page};
use crate::ClientResult;
use crate::http::HttpClient;

/// Page size used when loading dropdown options
pub const LOOKUP_PAGE_SIZE: u32 = 500;

pub async fn list<T, C>(client: &C, query: &ListQuery) -> ClientResult<Page<T>>
where
    T: DirectoryEntry + DeserializeOwned + Send,
    C: HttpClient,
{
    fetch_page(client, T::KIND.path(), &query.to_query()).await
}

pub async fn get<T, C>(client: &C, id: &str) -> ClientResult<T>
where
    T: DirectoryEntry + DeserializeOwned + Send,
    C: HttpClient,
{
    fetch_one(client, &format!("{}/{id}", T::KIND.path())).await
}

/// Active entries for a form dropdown
pub async fn options<T, C>(client: &C) -> ClientResult<Vec<T>>
where
    T: DirectoryEntry + DeserializeOwned + Send,
    C: HttpClient,
{
    let query = ListQuery {
        status: Some(ActiveStatus::Active),
        page_size: LOOKUP_PAGE_SIZE,
        ..ListQuery::default()
    };
    Ok(list::<T, C>(client, &query).await?.items)
}

/// Appointments, optionally narrowed to one customer
pub async fn appointments<C: HttpClient>(
    client: &C,
    customer_id: Option<&str>,
) -> ClientResult<Vec<Appointment>> {
    let mut query = vec![("pageSize", LOOKUP_PAGE_SIZE.to_string())];
    if let Some(id) = customer_id {
        query.push(("customerId", id.to_string()));
    }
    Ok(fetch_page(client, ResourceKind::Appointment.path(), &query).await?.items)
}
