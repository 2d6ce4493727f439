//! Security descriptor store: pre-resolved security facts for one component.
//!
//! Whatever loads the deployment configuration (annotation processing,
//! descriptor files) fills a [`ComponentSecurityDescription`] in; resolution
//! only ever reads the facts back through [`SecurityDescriptorStore`]. How a
//! fact came to be recorded is invisible on this side of the seam.

use std::collections::{HashMap, HashSet};

use gantry_core::{ClassName, MethodIdentifier, ViewName};

use crate::roles::Role;

/// Read side of a component's security facts, keyed per view.
///
/// `None` from the set/mapping lookups means "nothing recorded for this
/// view"; resolution treats that exactly like an empty set.
pub trait SecurityDescriptorStore {
    /// Methods of `view` marked deny-all.
    fn denied_methods(&self, view: &ViewName) -> Option<&HashSet<MethodIdentifier>>;

    /// True if deny-all applies at class level to methods `class` declares,
    /// as exposed through `view`.
    fn is_deny_all_applicable_to_class(&self, view: &ViewName, class: &ClassName) -> bool;

    /// Methods of `view` marked permit-all.
    fn permitted_methods(&self, view: &ViewName) -> Option<&HashSet<MethodIdentifier>>;

    /// True if permit-all applies at class level to methods `class` declares,
    /// as exposed through `view`.
    fn is_permit_all_applicable_to_class(&self, view: &ViewName, class: &ClassName) -> bool;

    /// Roles granted directly to `method` on `view`.
    fn roles_allowed(&self, view: &ViewName, method: &MethodIdentifier) -> Option<&HashSet<Role>>;

    /// Roles granted at class level, the fallback when a method carries none.
    fn roles_allowed_for_class(
        &self,
        view: &ViewName,
        class: &ClassName,
    ) -> Option<&HashSet<Role>>;

    /// Security domain the component is deployed under, if one is declared.
    fn security_domain(&self) -> Option<&str> {
        None
    }

    /// Role the component itself runs as when calling out, if declared.
    fn run_as(&self) -> Option<&Role> {
        None
    }

    /// Principal name accompanying the run-as role, if declared.
    fn run_as_principal(&self) -> Option<&str> {
        None
    }
}

/// In-memory security facts for one component.
///
/// The registration methods mirror how declarative security is stated:
/// markings either target one method signature or blanket a whole class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSecurityDescription {
    denied_methods: HashMap<ViewName, HashSet<MethodIdentifier>>,
    permitted_methods: HashMap<ViewName, HashSet<MethodIdentifier>>,
    deny_all_classes: HashMap<ViewName, HashSet<ClassName>>,
    permit_all_classes: HashMap<ViewName, HashSet<ClassName>>,
    method_roles: HashMap<ViewName, HashMap<MethodIdentifier, HashSet<Role>>>,
    class_roles: HashMap<ViewName, HashMap<ClassName, HashSet<Role>>>,
    security_domain: Option<String>,
    run_as: Option<Role>,
    run_as_principal: Option<String>,
}

impl ComponentSecurityDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one method of `view` deny-all.
    pub fn add_denied_method(&mut self, view: impl Into<ViewName>, method: MethodIdentifier) {
        self.denied_methods
            .entry(view.into())
            .or_default()
            .insert(method);
    }

    /// Mark one method of `view` permit-all.
    pub fn add_permitted_method(&mut self, view: impl Into<ViewName>, method: MethodIdentifier) {
        self.permitted_methods
            .entry(view.into())
            .or_default()
            .insert(method);
    }

    /// Apply deny-all at class level for methods `class` declares on `view`.
    pub fn apply_deny_all_to_class(
        &mut self,
        view: impl Into<ViewName>,
        class: impl Into<ClassName>,
    ) {
        self.deny_all_classes
            .entry(view.into())
            .or_default()
            .insert(class.into());
    }

    /// Apply permit-all at class level for methods `class` declares on `view`.
    pub fn apply_permit_all_to_class(
        &mut self,
        view: impl Into<ViewName>,
        class: impl Into<ClassName>,
    ) {
        self.permit_all_classes
            .entry(view.into())
            .or_default()
            .insert(class.into());
    }

    /// Grant roles directly to one method of `view`. Repeated grants for the
    /// same method accumulate into one set.
    pub fn add_roles_allowed<I>(
        &mut self,
        view: impl Into<ViewName>,
        method: MethodIdentifier,
        roles: I,
    ) where
        I: IntoIterator<Item = Role>,
    {
        self.method_roles
            .entry(view.into())
            .or_default()
            .entry(method)
            .or_default()
            .extend(roles);
    }

    /// Grant roles at class level for methods `class` declares on `view`.
    pub fn add_class_roles_allowed<I>(
        &mut self,
        view: impl Into<ViewName>,
        class: impl Into<ClassName>,
        roles: I,
    ) where
        I: IntoIterator<Item = Role>,
    {
        self.class_roles
            .entry(view.into())
            .or_default()
            .entry(class.into())
            .or_default()
            .extend(roles);
    }

    pub fn set_security_domain(&mut self, domain: impl Into<String>) {
        self.security_domain = Some(domain.into());
    }

    pub fn set_run_as(&mut self, role: Role) {
        self.run_as = Some(role);
    }

    pub fn set_run_as_principal(&mut self, principal: impl Into<String>) {
        self.run_as_principal = Some(principal.into());
    }
}

impl SecurityDescriptorStore for ComponentSecurityDescription {
    fn denied_methods(&self, view: &ViewName) -> Option<&HashSet<MethodIdentifier>> {
        self.denied_methods.get(view)
    }

    fn is_deny_all_applicable_to_class(&self, view: &ViewName, class: &ClassName) -> bool {
        self.deny_all_classes
            .get(view)
            .is_some_and(|classes| classes.contains(class))
    }

    fn permitted_methods(&self, view: &ViewName) -> Option<&HashSet<MethodIdentifier>> {
        self.permitted_methods.get(view)
    }

    fn is_permit_all_applicable_to_class(&self, view: &ViewName, class: &ClassName) -> bool {
        self.permit_all_classes
            .get(view)
            .is_some_and(|classes| classes.contains(class))
    }

    fn roles_allowed(&self, view: &ViewName, method: &MethodIdentifier) -> Option<&HashSet<Role>> {
        self.method_roles.get(view).and_then(|methods| methods.get(method))
    }

    fn roles_allowed_for_class(
        &self,
        view: &ViewName,
        class: &ClassName,
    ) -> Option<&HashSet<Role>> {
        self.class_roles.get(view).and_then(|classes| classes.get(class))
    }

    fn security_domain(&self) -> Option<&str> {
        self.security_domain.as_deref()
    }

    fn run_as(&self) -> Option<&Role> {
        self.run_as.as_ref()
    }

    fn run_as_principal(&self) -> Option<&str> {
        self.run_as_principal.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewName {
        ViewName::from("TellerLocal")
    }

    #[test]
    fn empty_description_has_no_facts() {
        let facts = ComponentSecurityDescription::new();
        assert!(facts.denied_methods(&view()).is_none());
        assert!(facts.permitted_methods(&view()).is_none());
        assert!(!facts.is_deny_all_applicable_to_class(&view(), &ClassName::from("com.acme.T")));
        assert!(!facts.is_permit_all_applicable_to_class(&view(), &ClassName::from("com.acme.T")));
        assert!(facts.roles_allowed(&view(), &MethodIdentifier::no_args("close")).is_none());
        assert!(facts.security_domain().is_none());
        assert!(facts.run_as().is_none());
        assert!(facts.run_as_principal().is_none());
    }

    #[test]
    fn facts_are_recorded_per_view() {
        let mut facts = ComponentSecurityDescription::new();
        facts.add_denied_method("TellerLocal", MethodIdentifier::no_args("close"));

        let local = facts.denied_methods(&ViewName::from("TellerLocal")).unwrap();
        assert!(local.contains(&MethodIdentifier::no_args("close")));
        assert!(facts.denied_methods(&ViewName::from("TellerRemote")).is_none());
    }

    #[test]
    fn class_level_flags_are_per_class() {
        let mut facts = ComponentSecurityDescription::new();
        facts.apply_deny_all_to_class("TellerLocal", "com.acme.AuditedOps");

        assert!(facts.is_deny_all_applicable_to_class(
            &view(),
            &ClassName::from("com.acme.AuditedOps")
        ));
        assert!(!facts.is_deny_all_applicable_to_class(
            &view(),
            &ClassName::from("com.acme.TellerOps")
        ));
    }

    #[test]
    fn repeated_role_grants_accumulate() {
        let mut facts = ComponentSecurityDescription::new();
        let method = MethodIdentifier::new("transfer", ["u64"]);
        facts.add_roles_allowed("TellerLocal", method.clone(), [Role::from("teller")]);
        facts.add_roles_allowed("TellerLocal", method.clone(), [Role::from("supervisor")]);

        let roles = facts.roles_allowed(&view(), &method).unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.contains(&Role::from("teller")));
        assert!(roles.contains(&Role::from("supervisor")));
    }

    #[test]
    fn component_level_settings_are_exposed() {
        let mut facts = ComponentSecurityDescription::new();
        facts.set_security_domain("bank");
        facts.set_run_as(Role::from("system"));
        facts.set_run_as_principal("batch-runner");

        assert_eq!(facts.security_domain(), Some("bank"));
        assert_eq!(facts.run_as(), Some(&Role::from("system")));
        assert_eq!(facts.run_as_principal(), Some("batch-runner"));
    }

    #[test]
    fn trait_defaults_report_no_component_level_settings() {
        struct Bare;
        impl SecurityDescriptorStore for Bare {
            fn denied_methods(&self, _: &ViewName) -> Option<&HashSet<MethodIdentifier>> {
                None
            }
            fn is_deny_all_applicable_to_class(&self, _: &ViewName, _: &ClassName) -> bool {
                false
            }
            fn permitted_methods(&self, _: &ViewName) -> Option<&HashSet<MethodIdentifier>> {
                None
            }
            fn is_permit_all_applicable_to_class(&self, _: &ViewName, _: &ClassName) -> bool {
                false
            }
            fn roles_allowed(
                &self,
                _: &ViewName,
                _: &MethodIdentifier,
            ) -> Option<&HashSet<Role>> {
                None
            }
            fn roles_allowed_for_class(
                &self,
                _: &ViewName,
                _: &ClassName,
            ) -> Option<&HashSet<Role>> {
                None
            }
        }

        assert!(Bare.security_domain().is_none());
        assert!(Bare.run_as().is_none());
        assert!(Bare.run_as_principal().is_none());
    }
}
