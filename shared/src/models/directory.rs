//! Directory models: companies, customers, professionals, teams, users
//! and appointments. Plain CRUD entities used by list pages and form
//! dropdowns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;

/// Resource kinds served by the directory endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Company,
    Customer,
    Professional,
    Team,
    User,
    Appointment,
}

impl ResourceKind {
    /// REST collection path segment
    pub fn path(&self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Customer => "customers",
            Self::Professional => "professionals",
            Self::Team => "teams",
            Self::User => "users",
            Self::Appointment => "appointments",
        }
    }
}

/// Active/inactive flag shared by directory entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

/// Common surface for entities shown on filtered list pages
pub trait DirectoryEntry: Identified {
    const KIND: ResourceKind;

    fn name(&self) -> &str;
    fn email(&self) -> Option<&str> {
        None
    }
    fn status(&self) -> ActiveStatus;
    fn kind_label(&self) -> Option<&str> {
        None
    }
    fn team_id(&self) -> Option<&str> {
        None
    }
    fn company_id(&self) -> Option<&str> {
        None
    }
}

/// Company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    /// e.g. "residential", "commercial"
    #[serde(default, rename = "type")]
    pub company_type: Option<String>,
}

/// Customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub company_id: Option<String>,
}

/// Field professional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

/// Team of professionals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
}

/// Admin-console user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// "admin", "company", "professional", "customer"
    pub role: String,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub company_id: Option<String>,
}

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
}

macro_rules! impl_identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_identified!(Company, Customer, Professional, Team, User, Appointment);

impl DirectoryEntry for Company {
    const KIND: ResourceKind = ResourceKind::Company;

    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn status(&self) -> ActiveStatus {
        self.status
    }
    fn kind_label(&self) -> Option<&str> {
        self.company_type.as_deref()
    }
}

impl DirectoryEntry for Customer {
    const KIND: ResourceKind = ResourceKind::Customer;

    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn status(&self) -> ActiveStatus {
        self.status
    }
    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }
}

impl DirectoryEntry for Professional {
    const KIND: ResourceKind = ResourceKind::Professional;

    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn status(&self) -> ActiveStatus {
        self.status
    }
    fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }
    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }
}

impl DirectoryEntry for Team {
    const KIND: ResourceKind = ResourceKind::Team;

    fn name(&self) -> &str {
        &self.name
    }
    fn status(&self) -> ActiveStatus {
        self.status
    }
    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }
}

impl DirectoryEntry for User {
    const KIND: ResourceKind = ResourceKind::User;

    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
    fn status(&self) -> ActiveStatus {
        self.status
    }
    fn kind_label(&self) -> Option<&str> {
        Some(&self.role)
    }
    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }
}
