//! Dropdown data for create/edit forms
//!
//! The lists are independent, so they are requested concurrently. Forms
//! that cannot work with partial data use [`load_lookups`]; forms that can
//! degrade a single dropdown use [`load_lookups_settled`].

use shared::models::{Appointment, Company, Customer, Professional, Team};

use crate::api::directory;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Options for every dropdown of a form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormLookups {
    pub companies: Vec<Company>,
    pub customers: Vec<Customer>,
    pub professionals: Vec<Professional>,
    pub teams: Vec<Team>,
    pub appointments: Vec<Appointment>,
}

/// Per-list outcome of a settled lookup load
#[derive(Debug)]
pub struct SettledLookups {
    pub companies: ClientResult<Vec<Company>>,
    pub customers: ClientResult<Vec<Customer>>,
    pub professionals: ClientResult<Vec<Professional>>,
    pub teams: ClientResult<Vec<Team>>,
    pub appointments: ClientResult<Vec<Appointment>>,
}

impl SettledLookups {
    /// Errors of the lists that failed
    pub fn errors(&self) -> Vec<&ClientError> {
        [
            self.companies.as_ref().err(),
            self.customers.as_ref().err(),
            self.professionals.as_ref().err(),
            self.teams.as_ref().err(),
            self.appointments.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Whatever loaded; failed lists come back empty
    pub fn into_partial(self) -> FormLookups {
        FormLookups {
            companies: self.companies.unwrap_or_default(),
            customers: self.customers.unwrap_or_default(),
            professionals: self.professionals.unwrap_or_default(),
            teams: self.teams.unwrap_or_default(),
            appointments: self.appointments.unwrap_or_default(),
        }
    }
}

/// Load every list; the first failure fails the whole load
pub async fn load_lookups<C: HttpClient>(
    client: &C,
    customer_id: Option<&str>,
) -> ClientResult<FormLookups> {
    let (companies, customers, professionals, teams, appointments) = tokio::try_join!(
        directory::options::<Company, C>(client),
        directory::options::<Customer, C>(client),
        directory::options::<Professional, C>(client),
        directory::options::<Team, C>(client),
        directory::appointments(client, customer_id),
    )?;
    Ok(FormLookups {
        companies,
        customers,
        professionals,
        teams,
        appointments,
    })
}

/// Load every list and report each outcome separately
pub async fn load_lookups_settled<C: HttpClient>(
    client: &C,
    customer_id: Option<&str>,
) -> SettledLookups {
    let (companies, customers, professionals, teams, appointments) = futures::join!(
        directory::options::<Company, C>(client),
        directory::options::<Customer, C>(client),
        directory::options::<Professional, C>(client),
        directory::options::<Team, C>(client),
        directory::appointments(client, customer_id),
    );
    let settled = SettledLookups {
        companies,
        customers,
        professionals,
        teams,
        appointments,
    };
    for err in settled.errors() {
        tracing::warn!(error = %err, "lookup list failed to load");
    }
    settled
}
