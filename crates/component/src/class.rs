//! Class metadata and inheritance-aware method resolution.
//!
//! There is no runtime type introspection here. Classes are registered as
//! plain metadata (name, optional superclass, declared method identifiers) by
//! whatever loads the deployment configuration, and resolving a view
//! signature to its implementation method is ordinary lookup over canonical
//! identifiers.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use gantry_core::{ClassName, DeploymentError, DeploymentResult, MethodIdentifier};

/// Declared shape of one implementation class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    name: ClassName,
    super_class: Option<ClassName>,
    methods: HashSet<MethodIdentifier>,
}

impl ClassMetadata {
    pub fn new(name: impl Into<ClassName>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            methods: HashSet::new(),
        }
    }

    pub fn with_super_class(mut self, super_class: impl Into<ClassName>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn with_method(mut self, method: MethodIdentifier) -> Self {
        self.methods.insert(method);
        self
    }

    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn super_class(&self) -> Option<&ClassName> {
        self.super_class.as_ref()
    }

    /// True if this class itself declares `method`. Inherited methods are not
    /// reported here; walking the chain is the registry's job.
    pub fn declares(&self, method: &MethodIdentifier) -> bool {
        self.methods.contains(method)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodIdentifier> {
        self.methods.iter()
    }
}

/// Implementation method found by resolution: the canonical identifier plus
/// the class that actually declares it.
///
/// The declaring class is what class-level security facts attach to, so it is
/// carried alongside the identifier rather than recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMethod {
    identifier: MethodIdentifier,
    declaring_class: ClassName,
}

impl ResolvedMethod {
    pub fn identifier(&self) -> &MethodIdentifier {
        &self.identifier
    }

    pub fn declaring_class(&self) -> &ClassName {
        &self.declaring_class
    }
}

/// Registry of class metadata keyed by class name.
///
/// Built once while loading a deployment; resolution only reads from it.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<ClassName, ClassMetadata>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class. Re-registering a name replaces the earlier entry.
    pub fn register(&mut self, class: ClassMetadata) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn get(&self, name: &ClassName) -> Option<&ClassMetadata> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &ClassName) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve a view-exposed signature to the implementation method backing it.
    ///
    /// Walks the superclass chain starting at `implementation_class`; the
    /// first class declaring `method` is its declaring class, so an override
    /// shadows any superclass declaration of the same signature.
    ///
    /// All failure modes are deployment-configuration defects: a signature no
    /// class in the chain declares, a reference to an unregistered class, or
    /// a superclass chain that loops.
    pub fn resolve_implementation_method(
        &self,
        implementation_class: &ClassName,
        method: &MethodIdentifier,
    ) -> DeploymentResult<ResolvedMethod> {
        let mut visited: HashSet<ClassName> = HashSet::new();
        let mut current = implementation_class;

        loop {
            if !visited.insert(current.clone()) {
                return Err(DeploymentError::InheritanceCycle(current.clone()));
            }

            let class = self
                .classes
                .get(current)
                .ok_or_else(|| DeploymentError::UnknownClass(current.clone()))?;

            if class.declares(method) {
                return Ok(ResolvedMethod {
                    identifier: method.clone(),
                    declaring_class: class.name.clone(),
                });
            }

            match class.super_class() {
                Some(parent) => current = parent,
                None => {
                    return Err(DeploymentError::missing_implementation_method(
                        method.clone(),
                        implementation_class.clone(),
                    ));
                }
            }
        }
    }
}
