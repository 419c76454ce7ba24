//! # Kanali Validation
//!
//! Document-local semantic validation for Kanali resources. Each validator
//! checks one resource kind against its business rules and reports the
//! first broken rule as a typed [`ValidationError`]:
//!
//! - [`validate_api_key`]: the credential gate the rotation engine runs
//!   before attempting any cryptography on a document
//! - [`validate_api_key_binding`]: key permissions (rate-limit syntax, HTTP
//!   verb enumeration, rule consistency)
//! - [`validate_api_proxy`]: routing shape (path/target form, TLS hosts,
//!   service/label consistency)
//!
//! Rules that need the cluster inventory (name/path uniqueness across
//! deployed resources) belong to the cluster collaborator, not here; every
//! rule in this crate is decidable from the document alone.
//!
//! ```rust
//! use kanali_spec::{ApiKey, KeyName};
//! use kanali_validation::validate_api_key;
//!
//! let name = KeyName::new("my-key").expect("valid name");
//! let key = ApiKey::new(name, "default", "6369706865727465787431");
//! assert!(validate_api_key(&key).is_ok());
//! ```

pub mod apikey;
pub mod binding;
pub mod error;
mod paths;
pub mod proxy;

pub use apikey::validate_api_key;
pub use binding::validate_api_key_binding;
pub use error::{Result, ValidationError};
pub use proxy::validate_api_proxy;

/// HTTP verbs a granular rule may grant.
pub const VALID_HTTP_VERBS: &[&str] = &[
    "GET", "POST", "PUT", "PATCH", "DELETE", "COPY", "HEAD", "OPTIONS", "LINK", "UNLINK", "PURGE",
    "LOCK", "UNLOCK", "PROPFIND", "VIEW",
];

/// Rate-limit units a key permission may use.
pub const VALID_RATE_UNITS: &[&str] = &["SECOND", "MINUTE", "HOUR"];

#[cfg(test)]
mod tests {
    use super::*;
    use kanali_spec::{ApiKey, ApiKeyBinding, ApiProxy};

    #[test]
    fn validators_accept_realistic_documents() {
        let key: ApiKey = serde_yaml::from_str(
            "kind: ApiKey\nmetadata:\n  name: k\n  namespace: ns\nspec:\n  data: deadbeef\n",
        )
        .expect("parse");
        assert!(validate_api_key(&key).is_ok());

        let binding: ApiKeyBinding = serde_yaml::from_str(
            "spec:\n  proxy: p\n  keys:\n    - name: k\n      defaultRule:\n        global: true\n",
        )
        .expect("parse");
        assert!(validate_api_key_binding(&binding).is_ok());

        let proxy: ApiProxy = serde_yaml::from_str(
            "spec:\n  path: /api\n  service:\n    name: svc\n    port: 80\n",
        )
        .expect("parse");
        assert!(validate_api_proxy(&proxy).is_ok());
    }
}
