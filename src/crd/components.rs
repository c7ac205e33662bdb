//! Per-component overrides for the Installation CRD
//!
//! Every component carries the same scheduling overrides (image, resources,
//! tolerations, extra env and volumes). Collections are user-owned: they are
//! passed through to the rendered workloads verbatim.

use k8s_openapi::api::core::v1::{EnvVar, ResourceRequirements, Toleration, Volume};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overrides for each Calico component
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsSpec {
    /// calico-node DaemonSet
    #[serde(default)]
    pub node: NodeSpec,

    /// calico-kube-controllers Deployment
    #[serde(default)]
    pub kube_controllers: KubeControllersSpec,

    /// CNI plugin install container
    #[serde(default)]
    pub cni: CNISpec,

    /// kube-proxy DaemonSet, for clusters that do not ship one
    #[serde(default)]
    pub kube_proxy: KubeProxySpec,
}

/// calico-node configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    /// Full image reference; derived from the registry and variant when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// Maximum DaemonSet pods unavailable during a rolling update
    ///
    /// Either an absolute count or a percentage ("10%").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,

    /// Extra environment variables appended to the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_env: Vec<EnvVar>,

    /// Extra volumes added to the pod
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_volumes: Vec<Volume>,

    /// Compute resource requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Pod tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

/// calico-kube-controllers configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeControllersSpec {
    /// Full image reference; derived from the registry and variant when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// Extra environment variables appended to the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_env: Vec<EnvVar>,

    /// Extra volumes added to the pod
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_volumes: Vec<Volume>,

    /// Compute resource requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Pod tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

/// CNI plugin configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CNISpec {
    /// Full image reference; derived from the registry and variant when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// Extra environment variables appended to the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_env: Vec<EnvVar>,

    /// Extra volumes added to the pod
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_volumes: Vec<Volume>,

    /// Compute resource requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Pod tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

/// kube-proxy configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeProxySpec {
    /// Whether the operator must deploy kube-proxy
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// API server address kube-proxy talks to (empty: in-cluster)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_server: String,

    /// Full image reference; the upstream kube-proxy image when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// Extra environment variables appended to the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_env: Vec<EnvVar>,

    /// Extra volumes added to the pod
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_volumes: Vec<Volume>,

    /// Compute resource requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Pod tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}
