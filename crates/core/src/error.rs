//! Deployment error model.
//!
//! Every variant here is a configuration defect discovered while resolving a
//! component's metadata. None of them are runtime conditions and none have a
//! recovery path: the owning component's deployment is aborted.

use thiserror::Error;

use crate::id::ClassName;
use crate::method::{MethodIdentifier, ViewIdentity};

/// Result type used across deployment-time resolution.
pub type DeploymentResult<T> = Result<T, DeploymentError>;

/// Fatal deployment-configuration error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeploymentError {
    /// A view exposes a signature with no corresponding implementation method.
    #[error("no method `{method}` on class `{searched_class}` or its superclasses")]
    MissingImplementationMethod {
        method: MethodIdentifier,
        searched_class: ClassName,
    },

    /// An operation is marked both deny-all and permit-all.
    #[error("operation `{operation}` is marked both deny-all and permit-all")]
    ConflictingAccessPolicy { operation: ViewIdentity },

    /// A referenced class is not present in the class registry.
    #[error("class `{0}` is not registered")]
    UnknownClass(ClassName),

    /// The superclass chain of a class loops back on itself.
    #[error("superclass cycle detected at class `{0}`")]
    InheritanceCycle(ClassName),
}

impl DeploymentError {
    pub fn missing_implementation_method(
        method: MethodIdentifier,
        searched_class: impl Into<ClassName>,
    ) -> Self {
        Self::MissingImplementationMethod {
            method,
            searched_class: searched_class.into(),
        }
    }

    pub fn conflicting_access_policy(operation: ViewIdentity) -> Self {
        Self::ConflictingAccessPolicy { operation }
    }
}
