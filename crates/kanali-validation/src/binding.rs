//! Validation of `ApiKeyBinding` resources.

use kanali_spec::{ApiKeyBinding, KeyPermission, Rule, Subpath};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::paths::validate_path;
use crate::{VALID_HTTP_VERBS, VALID_RATE_UNITS};

/// Checks an `ApiKeyBinding` document against its permission rules.
///
/// # Errors
///
/// Returns the first broken rule: a missing proxy name, an empty key list,
/// or any per-key violation (see [`ValidationError`]).
pub fn validate_api_key_binding(binding: &ApiKeyBinding) -> Result {
    if binding.spec.proxy_name.is_empty() {
        return Err(ValidationError::MissingProxyName);
    }

    validate_keys(&binding.spec.keys)?;
    debug!(name = %binding.metadata.name, "api key binding document validated");
    Ok(())
}

fn validate_keys(keys: &[KeyPermission]) -> Result {
    if keys.is_empty() {
        return Err(ValidationError::NoKeyPermissions);
    }

    for key in keys {
        if key.name.is_empty() {
            return Err(ValidationError::MissingKeyName);
        }
        if key.quota < 0 {
            return Err(ValidationError::NegativeQuota);
        }
        if let Some(rate) = &key.rate {
            if rate.amount < 1 {
                return Err(ValidationError::InvalidRateAmount);
            }
            if !VALID_RATE_UNITS.contains(&rate.unit.to_uppercase().as_str()) {
                return Err(ValidationError::InvalidRateUnit);
            }
        }
        validate_rule(&key.default_rule)?;
        validate_subpaths(&key.subpaths)?;
    }

    Ok(())
}

fn validate_subpaths(subpaths: &[Subpath]) -> Result {
    for subpath in subpaths {
        validate_path(&subpath.path)?;
        validate_rule(&subpath.rule)?;
    }
    Ok(())
}

fn validate_rule(rule: &Rule) -> Result {
    let verbs = rule
        .granular
        .as_ref()
        .map(|granular| granular.verbs.as_slice())
        .unwrap_or_default();

    if rule.global && !verbs.is_empty() {
        return Err(ValidationError::RedundantGranularRules);
    }

    for verb in verbs {
        let upper = verb.to_uppercase();
        if !VALID_HTTP_VERBS.contains(&upper.as_str()) {
            return Err(ValidationError::InvalidHttpVerb { verb: upper });
        }
    }

    Ok(())
}
