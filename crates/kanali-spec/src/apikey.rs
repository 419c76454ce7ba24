//! The `ApiKey` resource: an RSA-encrypted API key credential.

use serde::{Deserialize, Serialize};

use crate::meta::{KeyName, ObjectMeta, TypeMeta};

/// An API key resource holding a single encrypted credential.
///
/// The `spec.data` field carries the hex-encoded RSA-OAEP ciphertext of the
/// plaintext key; the plaintext itself never appears in a config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Kind and API version discriminant.
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    /// Name/namespace identity.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The credential payload.
    #[serde(default)]
    pub spec: ApiKeySpec,
}

/// The payload of an [`ApiKey`] resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeySpec {
    /// Hex-encoded RSA-OAEP ciphertext of the API key.
    #[serde(default)]
    pub data: String,
}

impl ApiKey {
    /// Creates a complete `ApiKey` resource from a validated name, a
    /// namespace, and the hex-encoded ciphertext.
    #[must_use]
    pub fn new(name: KeyName, namespace: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            type_meta: TypeMeta::kanali(crate::KIND_API_KEY),
            metadata: ObjectMeta::new(name.as_str(), namespace),
            spec: ApiKeySpec { data: data.into() },
        }
    }

    /// Returns a copy of this resource carrying a different ciphertext,
    /// preserving identity. This is the rotation transform's output shape.
    #[must_use]
    pub fn with_data(&self, data: impl Into<String>) -> Self {
        Self {
            type_meta: self.type_meta.clone(),
            metadata: self.metadata.clone(),
            spec: ApiKeySpec { data: data.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_discriminant_and_identity() {
        let name = KeyName::new("svc-key").expect("valid name");
        let key = ApiKey::new(name, "prod", "cafe");
        assert_eq!(key.type_meta.kind, crate::KIND_API_KEY);
        assert_eq!(key.type_meta.api_version, crate::API_VERSION);
        assert_eq!(key.metadata.name, "svc-key");
        assert_eq!(key.metadata.namespace, "prod");
        assert_eq!(key.spec.data, "cafe");
    }

    #[test]
    fn with_data_preserves_identity() {
        let name = KeyName::new("svc-key").expect("valid name");
        let key = ApiKey::new(name, "prod", "old");
        let rotated = key.with_data("new");
        assert_eq!(rotated.metadata, key.metadata);
        assert_eq!(rotated.type_meta, key.type_meta);
        assert_eq!(rotated.spec.data, "new");
    }

    #[test]
    fn type_meta_flattens_onto_the_document_root() {
        let name = KeyName::new("k").expect("valid name");
        let key = ApiKey::new(name, "ns", "00");
        let yaml = serde_yaml::to_string(&key).expect("serialize");
        // kind/apiVersion are document-level fields, not nested.
        assert!(yaml.starts_with("kind: ApiKey\n"));
    }
}
