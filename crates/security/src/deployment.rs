//! Whole-component resolution pass.
//!
//! Deployment processing calls [`resolve_component_security`] once per
//! component: every view-exposed operation is resolved to its effective
//! metadata and the result is returned as one immutable value. Enforcement
//! reads it afterwards without locking; nothing here is re-evaluated at call
//! time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use gantry_component::{ClassRegistry, ComponentDescription};
use gantry_core::{ComponentName, DeploymentId, DeploymentResult, MethodIdentifier, ViewName};

use crate::descriptor::SecurityDescriptorStore;
use crate::metadata::MethodSecurityMetadata;
use crate::roles::Role;

/// Resolved metadata for every method one view exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSecurityMetadata {
    view: ViewName,
    methods: HashMap<MethodIdentifier, MethodSecurityMetadata>,
}

impl ViewSecurityMetadata {
    pub fn view(&self) -> &ViewName {
        &self.view
    }

    pub fn method(&self, method: &MethodIdentifier) -> Option<&MethodSecurityMetadata> {
        self.methods.get(method)
    }

    pub fn methods(&self) -> impl Iterator<Item = (&MethodIdentifier, &MethodSecurityMetadata)> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Immutable security metadata of one deployed component.
///
/// Carries the provenance of the resolution run (deployment id, timestamp)
/// and the component-level security settings alongside the per-view maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSecurityMetadata {
    deployment_id: DeploymentId,
    resolved_at: DateTime<Utc>,
    component: ComponentName,
    security_domain: Option<String>,
    run_as: Option<Role>,
    run_as_principal: Option<String>,
    views: HashMap<ViewName, ViewSecurityMetadata>,
}

impl ComponentSecurityMetadata {
    pub fn deployment_id(&self) -> DeploymentId {
        self.deployment_id
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }

    pub fn component(&self) -> &ComponentName {
        &self.component
    }

    pub fn security_domain(&self) -> Option<&str> {
        self.security_domain.as_deref()
    }

    pub fn run_as(&self) -> Option<&Role> {
        self.run_as.as_ref()
    }

    pub fn run_as_principal(&self) -> Option<&str> {
        self.run_as_principal.as_deref()
    }

    pub fn view(&self, name: &ViewName) -> Option<&ViewSecurityMetadata> {
        self.views.get(name)
    }

    pub fn views(&self) -> impl Iterator<Item = &ViewSecurityMetadata> {
        self.views.values()
    }

    /// Direct lookup of one operation's metadata, the call the enforcement
    /// interceptor makes on every invocation.
    pub fn method(
        &self,
        view: &ViewName,
        method: &MethodIdentifier,
    ) -> Option<&MethodSecurityMetadata> {
        self.views.get(view).and_then(|view| view.method(method))
    }
}

/// Resolve the security metadata of one component.
///
/// Fails fast on the first configuration defect; a component never comes up
/// with a partially resolved security posture.
pub fn resolve_component_security<S>(
    description: &ComponentDescription,
    facts: &S,
    classes: &ClassRegistry,
) -> DeploymentResult<ComponentSecurityMetadata>
where
    S: SecurityDescriptorStore,
{
    let deployment_id = DeploymentId::new();
    let implementation_class = description.implementation_class();
    let mut views = HashMap::new();
    let mut method_count = 0usize;

    for view in description.views() {
        let mut methods = HashMap::new();
        for operation in view.operations() {
            let metadata = match MethodSecurityMetadata::resolve(
                facts,
                classes,
                implementation_class,
                &operation,
            ) {
                Ok(metadata) => metadata,
                Err(e) => {
                    error!(
                        deployment_id = %deployment_id,
                        component = %description.name(),
                        operation = %operation,
                        error = %e,
                        "security resolution failed"
                    );
                    return Err(e);
                }
            };

            debug!(
                deployment_id = %deployment_id,
                operation = %operation,
                deny_all = metadata.is_access_denied(),
                permit_all = metadata.is_permit_all(),
                roles = metadata.roles_allowed().len(),
                "resolved method security"
            );
            methods.insert(operation.method().clone(), metadata);
        }
        method_count += methods.len();
        views.insert(
            view.name().clone(),
            ViewSecurityMetadata {
                view: view.name().clone(),
                methods,
            },
        );
    }

    info!(
        deployment_id = %deployment_id,
        component = %description.name(),
        views = views.len(),
        methods = method_count,
        "component security metadata resolved"
    );

    Ok(ComponentSecurityMetadata {
        deployment_id,
        resolved_at: Utc::now(),
        component: description.name().clone(),
        security_domain: facts.security_domain().map(str::to_owned),
        run_as: facts.run_as().cloned(),
        run_as_principal: facts.run_as_principal().map(str::to_owned),
        views,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ComponentSecurityDescription;
    use gantry_component::{ClassMetadata, ViewDescription};

    const TELLER: &str = "com.acme.TellerOps";

    fn deposit() -> MethodIdentifier {
        MethodIdentifier::new("deposit", ["u64"])
    }

    fn close() -> MethodIdentifier {
        MethodIdentifier::no_args("close")
    }

    fn registry() -> ClassRegistry {
        let mut classes = ClassRegistry::new();
        classes.register(
            ClassMetadata::new(TELLER)
                .with_method(deposit())
                .with_method(close()),
        );
        classes
    }

    fn description() -> ComponentDescription {
        ComponentDescription::new("teller", TELLER)
            .with_view(
                ViewDescription::new("TellerLocal")
                    .with_method(deposit())
                    .with_method(close()),
            )
            .with_view(ViewDescription::new("TellerAdmin").with_method(close()))
    }

    #[test]
    fn every_exposed_operation_gets_metadata() {
        let facts = ComponentSecurityDescription::new();
        let resolved =
            resolve_component_security(&description(), &facts, &registry()).unwrap();

        let local = resolved.view(&ViewName::from("TellerLocal")).unwrap();
        assert_eq!(local.len(), 2);
        let admin = resolved.view(&ViewName::from("TellerAdmin")).unwrap();
        assert_eq!(admin.len(), 1);
        assert!(resolved.method(&ViewName::from("TellerAdmin"), &close()).is_some());
        assert!(resolved.method(&ViewName::from("TellerAdmin"), &deposit()).is_none());
    }

    #[test]
    fn the_same_signature_resolves_per_view() {
        let mut facts = ComponentSecurityDescription::new();
        facts.add_denied_method("TellerAdmin", close());
        let resolved =
            resolve_component_security(&description(), &facts, &registry()).unwrap();

        let on_admin = resolved.method(&ViewName::from("TellerAdmin"), &close()).unwrap();
        assert!(on_admin.is_access_denied());
        let on_local = resolved.method(&ViewName::from("TellerLocal"), &close()).unwrap();
        assert!(!on_local.is_access_denied());
    }

    #[test]
    fn first_defect_aborts_the_whole_component() {
        let mut facts = ComponentSecurityDescription::new();
        facts.add_denied_method("TellerLocal", deposit());
        facts.add_permitted_method("TellerLocal", deposit());

        let err = resolve_component_security(&description(), &facts, &registry()).unwrap_err();
        assert!(matches!(err, gantry_core::DeploymentError::ConflictingAccessPolicy { .. }));
    }

    #[test]
    fn component_level_settings_are_carried_over() {
        let mut facts = ComponentSecurityDescription::new();
        facts.set_security_domain("bank");
        facts.set_run_as(Role::from("system"));
        facts.set_run_as_principal("batch-runner");

        let resolved =
            resolve_component_security(&description(), &facts, &registry()).unwrap();
        assert_eq!(resolved.security_domain(), Some("bank"));
        assert_eq!(resolved.run_as(), Some(&Role::from("system")));
        assert_eq!(resolved.run_as_principal(), Some("batch-runner"));
        assert_eq!(resolved.component(), &ComponentName::from("teller"));
    }

    #[test]
    fn component_without_views_resolves_to_empty_metadata() {
        let description = ComponentDescription::new("teller", TELLER);
        let facts = ComponentSecurityDescription::new();
        let resolved =
            resolve_component_security(&description, &facts, &registry()).unwrap();
        assert_eq!(resolved.views().count(), 0);
    }

    #[test]
    fn resolved_metadata_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ComponentSecurityMetadata>();
    }
}
