//! # Kanali Spec
//!
//! The resource model for Kanali API gateway configuration documents:
//!
//! - **`ApiKey`**: an RSA-encrypted API key credential
//! - **`ApiKeyBinding`**: permissions granting API keys access to a proxy
//! - **`ApiProxy`**: an upstream service exposed through the gateway
//!
//! Every resource carries the Kubernetes-style `kind`/`apiVersion`
//! discriminant pair plus `metadata` identity, so documents of mixed kinds
//! can be told apart inside a single `---`-separated config stream.
//!
//! ## Example
//!
//! ```rust
//! use kanali_spec::{ApiKey, KeyName};
//!
//! let name = KeyName::new("payments-team").expect("valid name");
//! let key = ApiKey::new(name, "default", "6d795f6369706865727465787431");
//! assert_eq!(key.type_meta.kind, "ApiKey");
//! ```

pub mod apikey;
pub mod binding;
pub mod error;
pub mod meta;
pub mod proxy;

pub use apikey::{ApiKey, ApiKeySpec};
pub use binding::{ApiKeyBinding, ApiKeyBindingSpec, GranularRule, KeyPermission, Rate, Rule, Subpath};
pub use error::{Error, Result};
pub use meta::{KeyName, ObjectMeta, TypeMeta};
pub use proxy::{ApiProxy, ApiProxySpec, Host, Plugin, Service, ServiceLabel, Ssl};

/// API group and version carried by every Kanali resource.
pub const API_VERSION: &str = "kanali.io/v1";

/// Discriminant kind of the secret-bearing resource.
pub const KIND_API_KEY: &str = "ApiKey";

/// Discriminant kind of the key-permission resource.
pub const KIND_API_KEY_BINDING: &str = "ApiKeyBinding";

/// Discriminant kind of the proxy resource.
pub const KIND_API_PROXY: &str = "ApiProxy";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_round_trips_through_yaml() {
        let name = KeyName::new("abc123").expect("valid name");
        let key = ApiKey::new(name, "foo", "deadbeef");

        let yaml = serde_yaml::to_string(&key).expect("serialize");
        assert!(yaml.contains("kind: ApiKey"));
        assert!(yaml.contains("apiVersion: kanali.io/v1"));

        let parsed: ApiKey = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(parsed.metadata.name, "abc123");
        assert_eq!(parsed.metadata.namespace, "foo");
        assert_eq!(parsed.spec.data, "deadbeef");
    }

    #[test]
    fn api_key_parses_from_json_document() {
        let doc = r#"{
            "kind": "ApiKey",
            "apiVersion": "kanali.io/v1",
            "metadata": {"name": "my-key", "namespace": "default"},
            "spec": {"data": "00ff"}
        }"#;

        let parsed: ApiKey = serde_json::from_str(doc).expect("deserialize");
        assert_eq!(parsed.type_meta.kind, KIND_API_KEY);
        assert_eq!(parsed.spec.data, "00ff");
    }

    #[test]
    fn missing_fields_default_rather_than_fail() {
        // Partially specified documents still parse; validation catches the
        // holes afterwards, mirroring how loosely typed config streams are
        // consumed.
        let parsed: ApiKey = serde_yaml::from_str("kind: ApiKey\n").expect("deserialize");
        assert_eq!(parsed.metadata.name, "");
        assert_eq!(parsed.spec.data, "");
    }
}
