//! Installation Custom Resource Definition
//!
//! The Installation CRD is the single cluster-scoped resource describing how
//! Calico is deployed. Users usually set only a handful of fields; the rest is
//! filled by [`crate::defaults::fill_defaults`] before manifests are rendered.

use k8s_openapi::api::core::v1::LocalObjectReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::components::ComponentsSpec;
use super::types::{DatastoreConfig, IPPool, ProductVariant};

/// Specification for an Installation
///
/// String fields use the empty string as "unset" and collections use the
/// empty vector, so a spec serializes back without fields the user never
/// wrote.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "operator.tigera.io",
    version = "v1",
    kind = "Installation",
    plural = "installations",
    derive = "PartialEq",
    derive = "Default",
    printcolumn = r#"{"name":"Variant","type":"string","jsonPath":".spec.variant"}"#,
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".spec.version"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct InstallationSpec {
    /// Calico version to install
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Oldest operator version allowed to manage this installation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub minimum_operator_version: String,

    /// Product edition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ProductVariant>,

    /// Registry prefix for component images, always ending in `/` once defaulted
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub registry: String,

    /// Pull secrets attached to every component pod
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,

    /// Host directory for CNI network configuration
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cni_net_dir: String,

    /// Host directory for CNI plugin binaries
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cni_bin_dir: String,

    /// IP pools to create
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_pools: Vec<IPPool>,

    /// Datastore configuration
    #[serde(default, skip_serializing_if = "DatastoreConfig::is_empty")]
    pub datastore: DatastoreConfig,

    /// Per-component overrides
    #[serde(default)]
    pub components: ComponentsSpec,
}

impl InstallationSpec {
    /// Effective variant, treating an unset variant as the default edition
    pub fn variant_or_default(&self) -> ProductVariant {
        self.variant.unwrap_or_default()
    }
}

impl Installation {
    /// Copy suitable for printing or re-applying: server-managed metadata is dropped
    pub fn for_export(&self) -> Self {
        let mut exported = self.clone();
        exported.metadata.uid = None;
        exported.metadata.resource_version = None;
        exported.metadata.creation_timestamp = None;
        exported.metadata.generation = None;
        exported.metadata.managed_fields = None;
        exported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::CustomResourceExt;

    #[test]
    fn crd_is_cluster_scoped_under_operator_group() {
        let crd = Installation::crd();
        assert_eq!(crd.spec.group, "operator.tigera.io");
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.names.kind, "Installation");
        assert_eq!(crd.spec.names.plural, "installations");
    }

    #[test]
    fn empty_spec_serializes_without_fields() {
        let json = serde_json::to_value(InstallationSpec::default()).unwrap();
        // components is always written; everything else is skipped when unset
        let object = json.as_object().expect("spec should serialize as object");
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["components"]);
    }

    #[test]
    fn fields_use_camel_case() {
        let spec = InstallationSpec {
            minimum_operator_version: "0.9.1".to_string(),
            cni_net_dir: "/test/net".to_string(),
            cni_bin_dir: "/test/bin".to_string(),
            ip_pools: vec![IPPool::new("1.2.3.0/24")],
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["minimumOperatorVersion"], "0.9.1");
        assert_eq!(json["cniNetDir"], "/test/net");
        assert_eq!(json["cniBinDir"], "/test/bin");
        assert_eq!(json["ipPools"][0]["cidr"], "1.2.3.0/24");
    }

    #[test]
    fn unset_variant_reads_as_calico() {
        assert_eq!(
            InstallationSpec::default().variant_or_default(),
            ProductVariant::Calico
        );
    }

    #[test]
    fn for_export_strips_server_fields() {
        let mut installation = Installation::new("default", InstallationSpec::default());
        installation.metadata.uid = Some("abc-123".to_string());
        installation.metadata.resource_version = Some("12345".to_string());
        installation.metadata.generation = Some(4);

        let exported = installation.for_export();
        assert_eq!(exported.metadata.name.as_deref(), Some("default"));
        assert!(exported.metadata.uid.is_none());
        assert!(exported.metadata.resource_version.is_none());
        assert!(exported.metadata.generation.is_none());
    }
}
