use serde::{Deserialize, Serialize};

use super::{Address, Area};

/// One of the sites a client is served at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLocation {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    pub address: Address,
    pub area: Area,
    pub is_primary: bool,
}

/// Location form state; every text field is present, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLocationFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cnpj: String,
    pub address: Address,
    pub area: Area,
    pub is_primary: bool,
}

impl ClientLocationFormData {
    /// Turn submitted form state into a location record.
    ///
    /// Blank contact fields become `None`.
    pub fn into_location(self, id: impl Into<String>) -> ClientLocation {
        ClientLocation {
            id: id.into(),
            name: self.name,
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            cnpj: non_blank(self.cnpj),
            address: self.address,
            area: self.area,
            is_primary: self.is_primary,
        }
    }
}

impl ClientLocation {
    /// Prefill an edit form from an existing location
    pub fn to_form_data(&self) -> ClientLocationFormData {
        ClientLocationFormData {
            name: self.name.clone(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            cnpj: self.cnpj.clone().unwrap_or_default(),
            address: self.address.clone(),
            area: self.area,
            is_primary: self.is_primary,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form() -> ClientLocationFormData {
        ClientLocationFormData {
            name: "Filial Paulista".to_string(),
            email: "paulista@empresa.com.br".to_string(),
            phone: "  ".to_string(),
            cnpj: String::new(),
            address: Address {
                street: "Av. Paulista".to_string(),
                number: "1000".to_string(),
                complement: "15º andar".to_string(),
                zip_code: "01310-100".to_string(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            },
            area: Area::Centro,
            is_primary: true,
        }
    }

    #[test]
    fn form_blanks_become_absent_contact_fields() {
        let location = form().into_location("loc-1");
        assert_eq!(location.id, "loc-1");
        assert_eq!(location.email.as_deref(), Some("paulista@empresa.com.br"));
        assert_eq!(location.phone, None);
        assert_eq!(location.cnpj, None);
        assert!(location.is_primary);
    }

    #[test]
    fn edit_form_prefills_from_location() {
        let location = form().into_location("loc-1");
        let prefilled = location.to_form_data();
        assert_eq!(prefilled.email, "paulista@empresa.com.br");
        assert_eq!(prefilled.phone, "");
        assert_eq!(prefilled.address, location.address);
    }

    #[test]
    fn form_rejects_area_outside_the_enumeration() {
        let mut value = serde_json::to_value(form()).unwrap();
        value["area"] = json!("nordeste");
        assert!(serde_json::from_value::<ClientLocationFormData>(value).is_err());
    }

    #[test]
    fn location_omits_absent_contact_fields() {
        let value = serde_json::to_value(form().into_location("loc-1")).unwrap();
        assert_eq!(value["isPrimary"], json!(true));
        assert_eq!(value["address"]["zipCode"], json!("01310-100"));
        assert!(value.get("phone").is_none());
        assert!(value.get("cnpj").is_none());
    }
}
