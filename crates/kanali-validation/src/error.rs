//! Validation error types with one variant per broken rule.

use thiserror::Error;

/// A semantic rule a resource document failed to satisfy.
///
/// Messages are operator-facing; they surface verbatim in rotation reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An `ApiKey` carried no ciphertext.
    #[error("api key does not contain any data")]
    EmptyKeyData,

    /// A binding named no proxy.
    #[error("proxy name must be defined")]
    MissingProxyName,

    /// A binding granted access to no keys.
    #[error("must give at least one key permission")]
    NoKeyPermissions,

    /// A key permission carried no key name.
    #[error("key must have a name defined")]
    MissingKeyName,

    /// A key permission carried a negative quota.
    #[error("quota must be non negative")]
    NegativeQuota,

    /// A rate limit allowed fewer than one request per unit.
    #[error("rate amount must be a counting number")]
    InvalidRateAmount,

    /// A rate limit named an unknown time unit.
    #[error("valid units are 'second', 'minute', 'hour'")]
    InvalidRateUnit,

    /// A rule granted global access and granular verbs at once.
    #[error("global permission granted! granular rules redundant")]
    RedundantGranularRules,

    /// A granular rule named an unknown HTTP verb.
    #[error("{verb} is not a valid HTTP verb")]
    InvalidHttpVerb {
        /// The rejected verb, uppercased.
        verb: String,
    },

    /// A required path was missing.
    #[error("path must be defined")]
    MissingPath,

    /// A path did not begin with `/`.
    #[error("path must begin with '/'")]
    PathNotAbsolute,

    /// A target was present but did not begin with `/`.
    #[error("target must begin with '/'")]
    TargetNotAbsolute,

    /// A host declared TLS without naming the certificate secret.
    #[error("ssl name must be defined")]
    MissingSslSecretName,

    /// A host declared TLS without a host name.
    #[error("host name must be defined if ssl defined")]
    MissingHostName,

    /// A service port fell outside the valid range.
    #[error("service port must be in range [1-65535]")]
    InvalidServicePort,

    /// A service named neither a static name nor any labels.
    #[error("labels must be defined for dynamic service discovery")]
    MissingServiceSelector,

    /// A service carried both a static name and labels.
    #[error("service name defined, labels are redundant")]
    RedundantServiceLabels,

    /// A service label carried no name.
    #[error("label name must be defined")]
    MissingLabelName,

    /// A service label carried neither a value nor a header.
    #[error("label must have either a value or a header defined")]
    EmptyLabel,

    /// A service label carried both a value and a header.
    #[error("cannot specify both a value and a header")]
    AmbiguousLabel,

    /// A plugin pinned a version without naming the plugin.
    #[error("plugin name must be defined if version defined")]
    MissingPluginName,
}

/// Result type alias for validation.
pub type Result = std::result::Result<(), ValidationError>;
