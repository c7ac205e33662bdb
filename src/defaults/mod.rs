//! Defaulting engine for Installation resources
//!
//! Fills every unset field of an [`InstallationSpec`] with its default while
//! leaving every field the user set untouched. "Unset" means the empty string,
//! the empty vector or `None`.
//!
//! Root fields are resolved first. The registry is then normalized to end with
//! [`REGISTRY_SEPARATOR`], and only after that are component defaults derived
//! from the resolved registry and variant through an [`ImageContext`].
//! Collections (pull secrets, tolerations, env, volumes) are never inspected
//! element by element; `ipPools` is the only collection with a default.
//!
//! Defaulting is total and idempotent: running it on its own output is a no-op.

mod images;

pub use images::{
    Component, ImageContext, CALICO_IMAGE_TAG, ENTERPRISE_IMAGE_TAG, KUBE_PROXY_IMAGE,
};

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use tracing::debug;

use crate::crd::{
    CNISpec, ComponentsSpec, DatastoreConfig, DatastoreType, IPPool, Installation,
    InstallationSpec, KubeControllersSpec, KubeProxySpec, NodeSpec, ProductVariant,
};
use crate::{
    DEFAULT_CNI_BIN_DIR, DEFAULT_CNI_NET_DIR, DEFAULT_IP_POOL_CIDR, DEFAULT_NODE_MAX_UNAVAILABLE,
    DEFAULT_REGISTRY, DEFAULT_VERSION, REGISTRY_SEPARATOR,
};

/// Fill defaults on an Installation resource in place
pub fn fill_defaults(installation: &mut Installation) {
    debug!(
        installation = installation.metadata.name.as_deref().unwrap_or_default(),
        "Filling installation defaults"
    );
    fill_installation_spec(&mut installation.spec);
}

/// Return a defaulted copy of `spec`
pub fn with_defaults(mut spec: InstallationSpec) -> InstallationSpec {
    fill_installation_spec(&mut spec);
    spec
}

/// Fill defaults on an InstallationSpec in place
pub fn fill_installation_spec(spec: &mut InstallationSpec) {
    default_string(&mut spec.version, DEFAULT_VERSION, "spec.version");

    if spec.variant.is_none() {
        let variant = ProductVariant::default();
        debug!(field = "spec.variant", value = %variant, "Defaulted unset field");
        spec.variant = Some(variant);
    }

    default_string(&mut spec.registry, DEFAULT_REGISTRY, "spec.registry");
    normalize_registry(&mut spec.registry);

    default_string(&mut spec.cni_net_dir, DEFAULT_CNI_NET_DIR, "spec.cniNetDir");
    default_string(&mut spec.cni_bin_dir, DEFAULT_CNI_BIN_DIR, "spec.cniBinDir");

    if spec.ip_pools.is_empty() {
        debug!(field = "spec.ipPools", value = DEFAULT_IP_POOL_CIDR, "Defaulted unset field");
        spec.ip_pools.push(IPPool::new(DEFAULT_IP_POOL_CIDR));
    }

    fill_datastore(&mut spec.datastore);

    let ctx = ImageContext::new(&spec.registry, spec.variant_or_default());
    fill_components(&mut spec.components, &ctx);
}

/// Append the registry separator when missing
///
/// Applies to user-supplied registries as well as the default. An empty
/// registry is left empty.
pub fn normalize_registry(registry: &mut String) {
    if !registry.is_empty() && !registry.ends_with(REGISTRY_SEPARATOR) {
        registry.push(REGISTRY_SEPARATOR);
        debug!(field = "spec.registry", value = %registry, "Normalized registry");
    }
}

fn fill_datastore(datastore: &mut DatastoreConfig) {
    if datastore.type_.is_none() {
        debug!(field = "spec.datastore.type", value = %DatastoreType::Kubernetes, "Defaulted unset field");
        datastore.type_ = Some(DatastoreType::default());
    }
}

/// Fill defaults on every component
///
/// Components are independent of each other; each depends only on the root
/// context.
pub fn fill_components(components: &mut ComponentsSpec, ctx: &ImageContext<'_>) {
    debug!(
        registry = ctx.registry(),
        variant = %ctx.variant(),
        "Filling component defaults"
    );
    fill_node(&mut components.node, ctx);
    fill_kube_controllers(&mut components.kube_controllers, ctx);
    fill_cni(&mut components.cni, ctx);
    fill_kube_proxy(&mut components.kube_proxy, ctx);
}

fn fill_node(node: &mut NodeSpec, ctx: &ImageContext<'_>) {
    default_image(&mut node.image, ctx, Component::Node);

    if node.max_unavailable.is_none() {
        debug!(
            field = "spec.components.node.maxUnavailable",
            value = DEFAULT_NODE_MAX_UNAVAILABLE,
            "Defaulted unset field"
        );
        node.max_unavailable = Some(IntOrString::Int(DEFAULT_NODE_MAX_UNAVAILABLE));
    }
}

fn fill_kube_controllers(kube_controllers: &mut KubeControllersSpec, ctx: &ImageContext<'_>) {
    default_image(&mut kube_controllers.image, ctx, Component::KubeControllers);
}

fn fill_cni(cni: &mut CNISpec, ctx: &ImageContext<'_>) {
    default_image(&mut cni.image, ctx, Component::Cni);
}

// `required` defaults to false and `apiServer` to empty, which are already the
// unset values.
fn fill_kube_proxy(kube_proxy: &mut KubeProxySpec, ctx: &ImageContext<'_>) {
    default_image(&mut kube_proxy.image, ctx, Component::KubeProxy);
}

fn default_image(image: &mut String, ctx: &ImageContext<'_>, component: Component) {
    if image.is_empty() {
        *image = ctx.image_for(component);
        debug!(%component, image = %image, "Defaulted component image");
    }
}

fn default_string(value: &mut String, default: &str, field: &'static str) {
    if value.is_empty() {
        debug!(field, value = default, "Defaulted unset field");
        *value = default.to_string();
    }
}
