//! Default component images per product variant
//!
//! Calico and Tigera Secure Enterprise ship parallel image families. A
//! component's default image is the installation registry followed by the
//! variant's repository and tag for that component.

use crate::crd::ProductVariant;

/// Upstream kube-proxy image. Not mirrored into the product registries, so it
/// ignores both registry and variant.
pub const KUBE_PROXY_IMAGE: &str = "k8s.gcr.io/kube-proxy:v1.15.3";

/// Tag shared by every Calico component image
pub const CALICO_IMAGE_TAG: &str = "v3.8.1";

/// Tag shared by every Tigera Secure Enterprise component image
pub const ENTERPRISE_IMAGE_TAG: &str = "v2.5.0";

/// Components that run an operator-managed image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// calico-node
    Node,
    /// calico-kube-controllers
    KubeControllers,
    /// CNI plugin installer
    Cni,
    /// kube-proxy
    KubeProxy,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::KubeControllers => write!(f, "kubeControllers"),
            Self::Cni => write!(f, "cni"),
            Self::KubeProxy => write!(f, "kubeProxy"),
        }
    }
}

/// Repository (relative to the registry) for a variant's component image
fn repository(variant: ProductVariant, component: Component) -> Option<&'static str> {
    match (variant, component) {
        (_, Component::KubeProxy) => None,
        (ProductVariant::Calico, Component::Node) => Some("calico/node"),
        (ProductVariant::Calico, Component::KubeControllers) => Some("calico/kube-controllers"),
        (ProductVariant::Calico, Component::Cni) => Some("calico/cni"),
        (ProductVariant::TigeraSecureEnterprise, Component::Node) => Some("tigera/cnx-node"),
        (ProductVariant::TigeraSecureEnterprise, Component::KubeControllers) => {
            Some("tigera/kube-controllers")
        }
        (ProductVariant::TigeraSecureEnterprise, Component::Cni) => Some("tigera/cni"),
    }
}

fn tag(variant: ProductVariant) -> &'static str {
    match variant {
        ProductVariant::Calico => CALICO_IMAGE_TAG,
        ProductVariant::TigeraSecureEnterprise => ENTERPRISE_IMAGE_TAG,
    }
}

/// Root-level fields component image defaults are derived from
///
/// Built only after the registry has been defaulted and normalized, so image
/// references never contain a missing or doubled separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageContext<'a> {
    registry: &'a str,
    variant: ProductVariant,
}

impl<'a> ImageContext<'a> {
    /// Create a context from a normalized registry and the resolved variant
    pub fn new(registry: &'a str, variant: ProductVariant) -> Self {
        Self { registry, variant }
    }

    /// Registry prefix images are built under
    pub fn registry(&self) -> &str {
        self.registry
    }

    /// Variant selecting the image family
    pub fn variant(&self) -> ProductVariant {
        self.variant
    }

    /// Default image reference for a component
    pub fn image_for(&self, component: Component) -> String {
        match repository(self.variant, component) {
            Some(repo) => format!("{}{}:{}", self.registry, repo, tag(self.variant)),
            None => KUBE_PROXY_IMAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calico_images_live_under_registry() {
        let ctx = ImageContext::new("docker.io/", ProductVariant::Calico);
        assert_eq!(
            ctx.image_for(Component::Node),
            "docker.io/calico/node:v3.8.1"
        );
        assert_eq!(
            ctx.image_for(Component::KubeControllers),
            "docker.io/calico/kube-controllers:v3.8.1"
        );
        assert_eq!(ctx.image_for(Component::Cni), "docker.io/calico/cni:v3.8.1");
    }

    #[test]
    fn enterprise_uses_tigera_images() {
        let ctx = ImageContext::new("quay.io/", ProductVariant::TigeraSecureEnterprise);
        assert_eq!(
            ctx.image_for(Component::Node),
            "quay.io/tigera/cnx-node:v2.5.0"
        );
        assert_eq!(
            ctx.image_for(Component::KubeControllers),
            "quay.io/tigera/kube-controllers:v2.5.0"
        );
        assert_eq!(ctx.image_for(Component::Cni), "quay.io/tigera/cni:v2.5.0");
    }

    #[test]
    fn kube_proxy_ignores_registry_and_variant() {
        for variant in [ProductVariant::Calico, ProductVariant::TigeraSecureEnterprise] {
            let ctx = ImageContext::new("my-mirror/", variant);
            assert_eq!(ctx.image_for(Component::KubeProxy), KUBE_PROXY_IMAGE);
        }
    }

    #[test]
    fn component_names_match_field_names() {
        assert_eq!(Component::KubeControllers.to_string(), "kubeControllers");
        assert_eq!(Component::KubeProxy.to_string(), "kubeProxy");
    }
}
