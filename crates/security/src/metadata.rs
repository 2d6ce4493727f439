//! Effective per-method security metadata and the rules that produce it.
//!
//! One [`MethodSecurityMetadata`] is computed per exposed operation while a
//! component deploys and is immutable afterwards. Method-level facts are the
//! more specific statement of intent and take absolute precedence over
//! class-level defaults. A method marked both deny-all and permit-all is a
//! configuration defect that blocks deployment; it is never silently resolved
//! one way or the other.

use std::collections::HashSet;

use serde::Serialize;

use gantry_component::ClassRegistry;
use gantry_core::{ClassName, DeploymentError, DeploymentResult, ViewIdentity};

use crate::descriptor::SecurityDescriptorStore;
use crate::roles::Role;

/// Effective access-control metadata of one view-exposed method.
///
/// There is no public constructor: values only come out of [`resolve`],
/// which is what guarantees deny-all and permit-all are never both set.
///
/// [`resolve`]: MethodSecurityMetadata::resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSecurityMetadata {
    deny_all: bool,
    permit_all: bool,
    roles_allowed: HashSet<Role>,
}

impl MethodSecurityMetadata {
    /// Resolve the effective metadata for `operation`.
    ///
    /// The view signature is first resolved to the implementation method on
    /// `implementation_class` or inherited by it; class-level facts are then
    /// read against the class that declares that method, not against the
    /// implementation class the walk started from.
    pub fn resolve<S>(
        facts: &S,
        classes: &ClassRegistry,
        implementation_class: &ClassName,
        operation: &ViewIdentity,
    ) -> DeploymentResult<Self>
    where
        S: SecurityDescriptorStore,
    {
        let resolved =
            classes.resolve_implementation_method(implementation_class, operation.method())?;
        let declaring_class = resolved.declaring_class();

        let deny_all = compute_deny_all(facts, operation, declaring_class);
        let permit_all = compute_permit_all(facts, operation, declaring_class);
        if deny_all && permit_all {
            return Err(DeploymentError::conflicting_access_policy(operation.clone()));
        }

        let roles_allowed = compute_roles_allowed(facts, operation, declaring_class);

        Ok(Self {
            deny_all,
            permit_all,
            roles_allowed,
        })
    }

    /// True if access to the method is denied for every caller.
    pub fn is_access_denied(&self) -> bool {
        self.deny_all
    }

    /// True if access to the method is open to every caller.
    pub fn is_permit_all(&self) -> bool {
        self.permit_all
    }

    /// Roles allowed to access the method; empty when none are assigned.
    pub fn roles_allowed(&self) -> &HashSet<Role> {
        &self.roles_allowed
    }
}

/// Deny-all holds when the method is in the view's deny set, or when the
/// declaring class carries the class-level deny-all flag for this view.
fn compute_deny_all<S>(facts: &S, operation: &ViewIdentity, declaring_class: &ClassName) -> bool
where
    S: SecurityDescriptorStore,
{
    if facts
        .denied_methods(operation.view())
        .is_some_and(|methods| methods.contains(operation.method()))
    {
        return true;
    }
    facts.is_deny_all_applicable_to_class(operation.view(), declaring_class)
}

/// Permit-all mirrors deny-all over the permit sets and flags.
fn compute_permit_all<S>(facts: &S, operation: &ViewIdentity, declaring_class: &ClassName) -> bool
where
    S: SecurityDescriptorStore,
{
    if facts
        .permitted_methods(operation.view())
        .is_some_and(|methods| methods.contains(operation.method()))
    {
        return true;
    }
    facts.is_permit_all_applicable_to_class(operation.view(), declaring_class)
}

/// A non-empty method-level grant is taken unchanged; otherwise a non-empty
/// class-level grant for the declaring class; otherwise no roles. The two
/// levels are never combined.
fn compute_roles_allowed<S>(
    facts: &S,
    operation: &ViewIdentity,
    declaring_class: &ClassName,
) -> HashSet<Role>
where
    S: SecurityDescriptorStore,
{
    if let Some(roles) = facts.roles_allowed(operation.view(), operation.method()) {
        if !roles.is_empty() {
            return roles.clone();
        }
    }
    if let Some(roles) = facts.roles_allowed_for_class(operation.view(), declaring_class) {
        if !roles.is_empty() {
            return roles.clone();
        }
    }
    HashSet::new()
}
