//! Supporting types for the Installation CRD

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Product edition to install
///
/// The variant selects which family of container images the default
/// component images are built from.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum ProductVariant {
    /// Open source Calico (default)
    #[default]
    Calico,
    /// Tigera Secure Enterprise Edition
    TigeraSecureEnterprise,
}

impl std::str::FromStr for ProductVariant {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Calico" => Ok(Self::Calico),
            "TigeraSecureEnterprise" => Ok(Self::TigeraSecureEnterprise),
            _ => Err(crate::Error::invalid_value(
                "spec.variant",
                format!("unknown variant: {s}, expected one of: Calico, TigeraSecureEnterprise"),
            )),
        }
    }
}

impl std::fmt::Display for ProductVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calico => write!(f, "Calico"),
            Self::TigeraSecureEnterprise => write!(f, "TigeraSecureEnterprise"),
        }
    }
}

/// Backing store for Calico's own configuration objects
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum DatastoreType {
    /// Kubernetes API datastore (CRDs)
    #[default]
    Kubernetes,
}

impl std::fmt::Display for DatastoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kubernetes => write!(f, "Kubernetes"),
        }
    }
}

/// Datastore configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreConfig {
    /// Datastore type, unset until defaulted
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<DatastoreType>,
}

impl DatastoreConfig {
    /// Returns true if no datastore type has been chosen
    pub fn is_empty(&self) -> bool {
        self.type_.is_none()
    }
}

/// An IP address pool workloads are assigned addresses from
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IPPool {
    /// Pool CIDR, e.g. "192.168.0.0/16". Not validated.
    #[serde(default)]
    pub cidr: String,
}

impl IPPool {
    /// Create a pool for the given CIDR
    pub fn new(cidr: impl Into<String>) -> Self {
        Self { cidr: cidr.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_from_wire_names() {
        assert_eq!(
            "Calico".parse::<ProductVariant>().unwrap(),
            ProductVariant::Calico
        );
        assert_eq!(
            "TigeraSecureEnterprise".parse::<ProductVariant>().unwrap(),
            ProductVariant::TigeraSecureEnterprise
        );
        assert!("calico".parse::<ProductVariant>().is_err());
    }

    #[test]
    fn variant_display_matches_serde() {
        for variant in [ProductVariant::Calico, ProductVariant::TigeraSecureEnterprise] {
            let json = serde_json::to_value(variant).unwrap();
            assert_eq!(json, serde_json::Value::String(variant.to_string()));
        }
    }

    #[test]
    fn datastore_type_serializes_under_type_key() {
        let config = DatastoreConfig {
            type_: Some(DatastoreType::Kubernetes),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Kubernetes" }));
        assert!(DatastoreConfig::default().is_empty());
    }
}
