//! The `ApiKeyBinding` resource: permissions granting API keys access to a
//! proxy.

use serde::{Deserialize, Serialize};

use crate::meta::{ObjectMeta, TypeMeta};

/// Grants one or more API keys permission to call an upstream proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyBinding {
    /// Kind and API version discriminant.
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    /// Name/namespace identity.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The binding payload.
    #[serde(default)]
    pub spec: ApiKeyBindingSpec,
}

/// The payload of an [`ApiKeyBinding`] resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyBindingSpec {
    /// Name of the proxy the bound keys may call.
    #[serde(rename = "proxy", default)]
    pub proxy_name: String,
    /// The keys being granted access, with their per-key permissions.
    #[serde(default)]
    pub keys: Vec<KeyPermission>,
}

/// Permissions for one API key within a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPermission {
    /// Name of the `ApiKey` resource being granted access.
    #[serde(default)]
    pub name: String,
    /// Request quota; zero means unlimited.
    #[serde(default)]
    pub quota: i64,
    /// Optional rate limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Rate>,
    /// Rule applied to paths not covered by a subpath entry.
    #[serde(rename = "defaultRule", default)]
    pub default_rule: Rule,
    /// Per-subpath rule overrides.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subpaths: Vec<Subpath>,
}

/// A rate limit: `amount` requests per `unit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Number of requests allowed per unit.
    #[serde(default)]
    pub amount: i64,
    /// Time unit: `second`, `minute` or `hour` (case-insensitive).
    #[serde(default)]
    pub unit: String,
}

/// An access rule: either a global grant or a granular per-verb grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Grants every HTTP verb when set.
    #[serde(default)]
    pub global: bool,
    /// Grants only the listed HTTP verbs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granular: Option<GranularRule>,
}

/// The granular half of a [`Rule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranularRule {
    /// HTTP verbs granted by this rule.
    #[serde(default)]
    pub verbs: Vec<String>,
}

/// A subpath with its own access rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subpath {
    /// The subpath, beginning with `/`.
    #[serde(default)]
    pub path: String,
    /// Rule applied to requests under this subpath.
    #[serde(default)]
    pub rule: Rule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_parses_from_yaml() {
        let doc = "\
kind: ApiKeyBinding
apiVersion: kanali.io/v1
metadata:
  name: team-binding
  namespace: default
spec:
  proxy: payments-proxy
  keys:
    - name: team-key
      quota: 100
      rate:
        amount: 10
        unit: minute
      defaultRule:
        global: true
";
        let binding: ApiKeyBinding = serde_yaml::from_str(doc).expect("deserialize");
        assert_eq!(binding.spec.proxy_name, "payments-proxy");
        assert_eq!(binding.spec.keys.len(), 1);
        let key = &binding.spec.keys[0];
        assert_eq!(key.quota, 100);
        assert_eq!(key.rate.as_ref().map(|r| r.amount), Some(10));
        assert!(key.default_rule.global);
    }

    #[test]
    fn granular_rule_lists_verbs() {
        let doc = "\
spec:
  proxy: p
  keys:
    - name: k
      defaultRule:
        granular:
          verbs: [GET, POST]
";
        let binding: ApiKeyBinding = serde_yaml::from_str(doc).expect("deserialize");
        let rule = &binding.spec.keys[0].default_rule;
        assert!(!rule.global);
        assert_eq!(
            rule.granular.as_ref().map(|g| g.verbs.clone()),
            Some(vec!["GET".to_string(), "POST".to_string()])
        );
    }
}
