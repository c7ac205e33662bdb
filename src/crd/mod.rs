//! Custom Resource Definitions for the Calico operator
//!
//! This module contains the Installation CRD and its supporting types.

mod components;
mod installation;
mod types;

pub use components::{CNISpec, ComponentsSpec, KubeControllersSpec, KubeProxySpec, NodeSpec};
pub use installation::{Installation, InstallationSpec};
pub use types::{DatastoreConfig, DatastoreType, IPPool, ProductVariant};
