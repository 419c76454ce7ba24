//! Validation of `ApiProxy` resources.

use kanali_spec::{ApiProxy, Host, Plugin, Service, ServiceLabel};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::paths::{validate_path, validate_target};

/// Checks an `ApiProxy` document against its routing rules.
///
/// # Errors
///
/// Returns the first broken rule: path/target shape, host TLS naming,
/// service/label consistency, or plugin naming (see [`ValidationError`]).
pub fn validate_api_proxy(proxy: &ApiProxy) -> Result {
    validate_path(&proxy.spec.path)?;
    validate_target(&proxy.spec.target)?;
    validate_hosts(&proxy.spec.hosts)?;
    validate_service(&proxy.spec.service)?;
    validate_plugins(&proxy.spec.plugins)?;
    debug!(name = %proxy.metadata.name, "api proxy document validated");
    Ok(())
}

fn validate_hosts(hosts: &[Host]) -> Result {
    for host in hosts {
        if host.ssl.secret_name.is_empty() {
            return Err(ValidationError::MissingSslSecretName);
        }
        if host.name.is_empty() {
            return Err(ValidationError::MissingHostName);
        }
    }
    Ok(())
}

fn validate_service(service: &Service) -> Result {
    if service.port < 1 || service.port > 65535 {
        return Err(ValidationError::InvalidServicePort);
    }

    if service.name.is_empty() && service.labels.is_empty() {
        return Err(ValidationError::MissingServiceSelector);
    }

    if !service.name.is_empty() && !service.labels.is_empty() {
        return Err(ValidationError::RedundantServiceLabels);
    }

    validate_labels(&service.labels)
}

fn validate_labels(labels: &[ServiceLabel]) -> Result {
    for label in labels {
        if label.name.is_empty() {
            return Err(ValidationError::MissingLabelName);
        }
        if label.value.is_empty() && label.header.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        if !label.value.is_empty() && !label.header.is_empty() {
            return Err(ValidationError::AmbiguousLabel);
        }
    }
    Ok(())
}

fn validate_plugins(plugins: &[Plugin]) -> Result {
    for plugin in plugins {
        if plugin.version.is_empty() {
            continue;
        }
        if plugin.name.is_empty() {
            return Err(ValidationError::MissingPluginName);
        }
    }
    Ok(())
}
