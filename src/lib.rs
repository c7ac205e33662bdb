//! Calico operator - Installation resource model and defaulting engine
//!
//! The `Installation` custom resource describes how the Calico networking stack
//! is deployed on a cluster: container images and registry, CNI paths, IP pools
//! and per-component scheduling overrides. Before the resource is rendered into
//! manifests it is passed once through [`defaults::fill_defaults`], which fills
//! every unset field and leaves everything the user set untouched.
//!
//! # Modules
//!
//! - [`crd`] - Custom Resource Definitions (Installation and its component specs)
//! - [`defaults`] - Defaulting engine and per-variant image tables
//! - [`yaml`] - YAML manifest parsing into typed resources
//! - [`error`] - Error types for manifest handling

#![deny(missing_docs)]

pub mod crd;
pub mod defaults;
pub mod error;
pub mod yaml;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Default Configuration Constants
// =============================================================================
// These constants define the values the defaulting engine writes into unset
// Installation fields. Tests and the CLI reference them instead of repeating
// literals.

/// Default Calico version when `spec.version` is unset
pub const DEFAULT_VERSION: &str = "latest";

/// Default image registry when `spec.registry` is unset
///
/// Already normalized: registries always end with [`REGISTRY_SEPARATOR`].
pub const DEFAULT_REGISTRY: &str = "docker.io/";

/// Separator a normalized registry must end with
pub const REGISTRY_SEPARATOR: char = '/';

/// Default host directory for CNI network configuration
pub const DEFAULT_CNI_NET_DIR: &str = "/etc/cni/net.d";

/// Default host directory for CNI plugin binaries
pub const DEFAULT_CNI_BIN_DIR: &str = "/opt/cni/bin";

/// CIDR of the single IP pool injected when `spec.ipPools` is empty
pub const DEFAULT_IP_POOL_CIDR: &str = "192.168.0.0/16";

/// Default calico-node DaemonSet `maxUnavailable` (absolute node count)
pub const DEFAULT_NODE_MAX_UNAVAILABLE: i32 = 1;

/// Name of the cluster-wide Installation resource the operator reconciles
pub const DEFAULT_INSTALLATION_NAME: &str = "default";
