use serde::{Deserialize, Serialize};

/// Postal address of a client or one of its locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub zip_code: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}
