//! Mapping between backend `/api/clients` payloads and the view models.
//!
//! The backend mixes snake_case and camelCase keys, sends nulls and leaves
//! fields out, so inbound records are read leniently and filled with list
//! defaults. Where both spellings of a key are present, the first non-empty
//! one wins (snake_case first).

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Address, Area, Client, ClientFormData, ClientLocation, ClientStatus};

const DEFAULT_LAST_SERVICE: &str = "-";
const DEFAULT_TOTAL_VALUE: &str = "R$ 0,00";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAddress {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub zip_code: Option<String>,
    #[serde(rename = "zipCode")]
    pub zip_code_camel: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Client location (branch) as returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLocation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cnpj: Option<String>,
    pub address: Option<ApiAddress>,
    pub area: Option<String>,
    pub is_primary: Option<bool>,
    #[serde(rename = "isPrimary")]
    pub is_primary_camel: Option<bool>,
}

/// Client record as returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiClient {
    pub id: i64,
    pub name: Option<String>,
    pub legal_name: Option<String>,
    pub cnpj: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<ApiAddress>,
    pub area: Option<String>,
    pub locations: Option<Vec<ApiLocation>>,
    pub status: Option<String>,
    pub services_active: Option<u32>,
    #[serde(rename = "servicesActive")]
    pub services_active_camel: Option<u32>,
    pub services_completed: Option<u32>,
    #[serde(rename = "servicesCompleted")]
    pub services_completed_camel: Option<u32>,
    pub last_service: Option<String>,
    #[serde(rename = "lastService")]
    pub last_service_camel: Option<String>,
    pub rating: Option<f64>,
    pub total_value: Option<String>,
    #[serde(rename = "totalValue")]
    pub total_value_camel: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<String>,
}

impl From<ApiAddress> for Address {
    fn from(api: ApiAddress) -> Self {
        Address {
            street: api.street.unwrap_or_default(),
            number: api.number.unwrap_or_default(),
            complement: api.complement.unwrap_or_default(),
            zip_code: present(api.zip_code)
                .or(present(api.zip_code_camel))
                .unwrap_or_default(),
            neighborhood: api.neighborhood.unwrap_or_default(),
            city: api.city.unwrap_or_default(),
            state: api.state.unwrap_or_default(),
        }
    }
}

impl From<ApiLocation> for ClientLocation {
    fn from(api: ApiLocation) -> Self {
        let id = api.id.unwrap_or_default();
        let area = parse_area(api.area, || format!("location {id}"));

        ClientLocation {
            name: api.name.unwrap_or_default(),
            email: present(api.email),
            phone: present(api.phone),
            cnpj: present(api.cnpj),
            address: api.address.unwrap_or_default().into(),
            area,
            is_primary: api.is_primary.unwrap_or(false)
                || api.is_primary_camel.unwrap_or(false),
            id,
        }
    }
}

impl From<ApiClient> for Client {
    fn from(api: ApiClient) -> Self {
        let id = api.id;
        let area = parse_area(api.area, || format!("client {id}"));

        let status = match present(api.status).as_deref() {
            Some("inactive") => ClientStatus::Inactive,
            Some("active") | None => ClientStatus::Active,
            Some(other) => {
                warn!(client_id = id, status = %other, "unknown status, using default");
                ClientStatus::default()
            }
        };

        Client {
            id,
            name: present(api.legal_name)
                .or(present(api.name))
                .unwrap_or_default(),
            cnpj: api.cnpj.unwrap_or_default(),
            email: api.email.unwrap_or_default(),
            phone: api.phone.unwrap_or_default(),
            address: api.address.unwrap_or_default().into(),
            area,
            locations: Some(
                api.locations
                    .unwrap_or_default()
                    .into_iter()
                    .map(ClientLocation::from)
                    .collect(),
            ),
            status,
            services_active: first_nonzero(api.services_active, api.services_active_camel),
            services_completed: first_nonzero(
                api.services_completed,
                api.services_completed_camel,
            ),
            last_service: present(api.last_service)
                .or(present(api.last_service_camel))
                .unwrap_or_else(|| DEFAULT_LAST_SERVICE.to_string()),
            rating: api.rating.unwrap_or(0.0),
            total_value: present(api.total_value)
                .or(present(api.total_value_camel))
                .unwrap_or_else(|| DEFAULT_TOTAL_VALUE.to_string()),
            notes: Some(api.notes.unwrap_or_default()),
            created_at: present(api.created_at).or(present(api.created_at_camel)),
        }
    }
}

/// Unknown or missing areas fall back to the default zone
fn parse_area(raw: Option<String>, owner: impl FnOnce() -> String) -> Area {
    match present(raw) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(record = %owner(), area = %raw, "unknown area, using default");
            Area::default()
        }),
        None => Area::default(),
    }
}

/// Zero counts as missing, so the other spelling gets a chance
fn first_nonzero(first: Option<u32>, second: Option<u32>) -> u32 {
    first.filter(|n| *n != 0).or(second).unwrap_or(0)
}

/// Empty strings count as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadAddress {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub zip_code: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<&Address> for PayloadAddress {
    fn from(address: &Address) -> Self {
        PayloadAddress {
            street: address.street.clone(),
            number: address.number.clone(),
            complement: address.complement.clone(),
            zip_code: address.zip_code.clone(),
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadLocation {
    pub id: String,
    pub name: String,
    pub address: PayloadAddress,
    pub area: Area,
    #[serde(rename = "isPrimary")]
    pub is_primary: bool,
}

/// Body sent to create or update a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientPayload {
    pub name: String,
    pub legal_name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    pub address: PayloadAddress,
    pub area: Area,
    pub locations: Vec<PayloadLocation>,
    pub notes: String,
    pub status: ClientStatus,
}

impl ClientPayload {
    pub fn new(form: &ClientFormData, locations: &[ClientLocation]) -> Self {
        ClientPayload {
            name: form.name.clone(),
            legal_name: form.name.clone(),
            cnpj: form.cnpj.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: (&form.address).into(),
            area: form.area,
            locations: locations
                .iter()
                .map(|location| PayloadLocation {
                    id: location.id.clone(),
                    name: location.name.clone(),
                    address: (&location.address).into(),
                    area: location.area,
                    is_primary: location.is_primary,
                })
                .collect(),
            notes: form.notes.clone(),
            status: form.status,
        }
    }
}
