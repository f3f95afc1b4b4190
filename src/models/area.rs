use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Service zone a client or location belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Norte,
    Sul,
    Leste,
    Oeste,
    #[default]
    Centro,
}

impl Area {
    pub const ALL: [Area; 5] = [Area::Norte, Area::Sul, Area::Leste, Area::Oeste, Area::Centro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Norte => "norte",
            Area::Sul => "sul",
            Area::Leste => "leste",
            Area::Oeste => "oeste",
            Area::Centro => "centro",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| ModelError::InvalidArea(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_area() {
        for area in Area::ALL {
            assert_eq!(area.as_str().parse::<Area>(), Ok(area));
        }
    }

    #[test]
    fn rejects_unknown_area() {
        assert_eq!(
            "nordeste".parse::<Area>(),
            Err(ModelError::InvalidArea("nordeste".to_string()))
        );
        // Matching is exact, as on the wire
        assert!("Norte".parse::<Area>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Area::Oeste).unwrap(), "\"oeste\"");
        assert!(serde_json::from_str::<Area>("\"zona-rural\"").is_err());
    }
}
