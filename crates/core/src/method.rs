//! Canonical method identity.
//!
//! A method is identified by its name and ordered parameter-type list only.
//! The declaring type is deliberately not part of the identity: an identifier
//! built from a view signature compares equal to the identifier of the
//! implementation method it maps to, which is what makes cross-type lookup a
//! plain map/set operation.

use serde::{Deserialize, Serialize};

use crate::id::ViewName;

/// Canonical key of a method: name plus ordered parameter types.
///
/// Parameter types are opaque strings; `configure(String, u32)` and
/// `configure(u32, String)` are distinct methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodIdentifier {
    name: String,
    param_types: Vec<String>,
}

impl MethodIdentifier {
    pub fn new<I, S>(name: impl Into<String>, param_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Identifier of a zero-argument method.
    pub fn no_args(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_types: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_types(&self) -> &[String] {
        &self.param_types
    }
}

impl core::fmt::Display for MethodIdentifier {
    /// Renders as `name(t1, t2)`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.name, self.param_types.join(", "))
    }
}

/// One exposed operation: a view together with one of its method signatures.
///
/// This is the unit security metadata is resolved for; the same signature on
/// two different views is two distinct operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewIdentity {
    view: ViewName,
    method: MethodIdentifier,
}

impl ViewIdentity {
    pub fn new(view: impl Into<ViewName>, method: MethodIdentifier) -> Self {
        Self {
            view: view.into(),
            method,
        }
    }

    pub fn view(&self) -> &ViewName {
        &self.view
    }

    pub fn method(&self) -> &MethodIdentifier {
        &self.method
    }
}

impl core::fmt::Display for ViewIdentity {
    /// Renders as `view#name(t1, t2)`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.view, self.method)
    }
}
