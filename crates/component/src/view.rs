//! Views: the exposed interfaces of a component.

use serde::{Deserialize, Serialize};

use gantry_core::{MethodIdentifier, ViewIdentity, ViewName};

/// One exposed view: a name plus the method signatures it exposes.
///
/// Signatures are kept in registration order so resolution output and logs
/// stay stable for a given configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescription {
    name: ViewName,
    exposed_methods: Vec<MethodIdentifier>,
}

impl ViewDescription {
    pub fn new(name: impl Into<ViewName>) -> Self {
        Self {
            name: name.into(),
            exposed_methods: Vec::new(),
        }
    }

    /// Expose a method through this view. Registering the same signature
    /// twice keeps a single entry.
    pub fn with_method(mut self, method: MethodIdentifier) -> Self {
        if !self.exposed_methods.contains(&method) {
            self.exposed_methods.push(method);
        }
        self
    }

    pub fn name(&self) -> &ViewName {
        &self.name
    }

    pub fn exposed_methods(&self) -> &[MethodIdentifier] {
        &self.exposed_methods
    }

    /// Iterate the exposed signatures as full (view, method) operations.
    pub fn operations(&self) -> impl Iterator<Item = ViewIdentity> + '_ {
        self.exposed_methods
            .iter()
            .map(move |method| ViewIdentity::new(self.name.clone(), method.clone()))
    }
}
