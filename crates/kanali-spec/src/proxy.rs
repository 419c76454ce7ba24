//! The `ApiProxy` resource: an upstream service exposed through the gateway.

use serde::{Deserialize, Serialize};

use crate::meta::{ObjectMeta, TypeMeta};

/// Exposes an upstream service under a gateway path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProxy {
    /// Kind and API version discriminant.
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    /// Name/namespace identity.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The proxy payload.
    #[serde(default)]
    pub spec: ApiProxySpec,
}

/// The payload of an [`ApiProxy`] resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProxySpec {
    /// Gateway path the proxy listens on, beginning with `/`.
    #[serde(default)]
    pub path: String,
    /// Optional upstream path prefix, beginning with `/` when present.
    #[serde(default)]
    pub target: String,
    /// Virtual hosts with TLS configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<Host>,
    /// The upstream service.
    #[serde(default)]
    pub service: Service,
    /// Request/response plugins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
}

/// A virtual host entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Host name.
    #[serde(default)]
    pub name: String,
    /// TLS configuration for this host.
    #[serde(default)]
    pub ssl: Ssl,
}

/// TLS configuration referencing a certificate secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ssl {
    /// Name of the secret holding the certificate.
    #[serde(rename = "secretName", default)]
    pub secret_name: String,
}

/// The upstream service behind a proxy: either a static name or a dynamic
/// label selector, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Static service name.
    #[serde(default)]
    pub name: String,
    /// Service port.
    #[serde(default)]
    pub port: i64,
    /// Label selectors for dynamic service discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ServiceLabel>,
}

/// One label selector for dynamic service discovery: matched against either
/// a fixed value or a request header, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLabel {
    /// Label name.
    #[serde(default)]
    pub name: String,
    /// Fixed label value.
    #[serde(default)]
    pub value: String,
    /// Request header supplying the label value.
    #[serde(default)]
    pub header: String,
}

/// A plugin attached to a proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin name.
    #[serde(default)]
    pub name: String,
    /// Plugin version; empty selects the default.
    #[serde(default)]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_parses_from_yaml() {
        let doc = "\
kind: ApiProxy
apiVersion: kanali.io/v1
metadata:
  name: payments-proxy
  namespace: default
spec:
  path: /payments
  target: /
  service:
    name: payments-svc
    port: 8080
  plugins:
    - name: apikey
      version: v1
";
        let proxy: ApiProxy = serde_yaml::from_str(doc).expect("deserialize");
        assert_eq!(proxy.spec.path, "/payments");
        assert_eq!(proxy.spec.service.name, "payments-svc");
        assert_eq!(proxy.spec.service.port, 8080);
        assert_eq!(proxy.spec.plugins[0].name, "apikey");
    }

    #[test]
    fn dynamic_service_uses_labels() {
        let doc = "\
spec:
  path: /p
  service:
    port: 443
    labels:
      - name: release
        header: x-release
";
        let proxy: ApiProxy = serde_yaml::from_str(doc).expect("deserialize");
        assert!(proxy.spec.service.name.is_empty());
        assert_eq!(proxy.spec.service.labels[0].header, "x-release");
    }
}
