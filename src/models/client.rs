use serde::{Deserialize, Serialize};

use super::{Address, Area, ClientLocation};
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

/// Client record as shown in the management lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub area: Area,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<ClientLocation>>,
    pub status: ClientStatus,
    pub services_active: u32,
    pub services_completed: u32,
    pub last_service: String,
    pub rating: f64,
    /// Preformatted currency text, e.g. "R$ 1.500,00"
    pub total_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Client {
    pub fn locations(&self) -> &[ClientLocation] {
        self.locations.as_deref().unwrap_or_default()
    }

    /// First location flagged as primary
    pub fn primary_location(&self) -> Option<&ClientLocation> {
        self.locations().iter().find(|location| location.is_primary)
    }

    /// Check that at most one location is flagged as primary
    pub fn validate_locations(&self) -> Result<(), ModelError> {
        let primaries = self
            .locations()
            .iter()
            .filter(|location| location.is_primary)
            .count();

        if primaries > 1 {
            return Err(ModelError::MultiplePrimaryLocations(primaries));
        }
        Ok(())
    }

    /// Make the given location the only primary one
    pub fn set_primary_location(&mut self, id: &str) -> Result<(), ModelError> {
        let locations = self
            .locations
            .as_mut()
            .filter(|locations| locations.iter().any(|location| location.id == id))
            .ok_or_else(|| ModelError::UnknownLocation(id.to_string()))?;

        for location in locations.iter_mut() {
            location.is_primary = location.id == id;
        }
        Ok(())
    }

    /// Prefill the client edit form
    pub fn to_form_data(&self) -> ClientFormData {
        ClientFormData {
            name: self.name.clone(),
            cnpj: self.cnpj.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            area: self.area,
            notes: self.notes.clone().unwrap_or_default(),
            status: self.status,
        }
    }
}

/// Client create/edit form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFormData {
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub area: Area,
    pub notes: String,
    pub status: ClientStatus,
}
