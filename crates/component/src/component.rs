//! Component descriptions.

use serde::{Deserialize, Serialize};

use gantry_core::{ClassName, ComponentName, ViewName};

use crate::view::ViewDescription;

/// Structural description of one deployed component: the class implementing
/// it and the views it is exposed through.
///
/// Security facts live separately in the component's security description;
/// this type only answers "what is there", not "who may call it".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescription {
    name: ComponentName,
    implementation_class: ClassName,
    views: Vec<ViewDescription>,
}

impl ComponentDescription {
    pub fn new(name: impl Into<ComponentName>, implementation_class: impl Into<ClassName>) -> Self {
        Self {
            name: name.into(),
            implementation_class: implementation_class.into(),
            views: Vec::new(),
        }
    }

    /// Attach a view. A view with the same name replaces the earlier one.
    pub fn with_view(mut self, view: ViewDescription) -> Self {
        self.views.retain(|existing| existing.name() != view.name());
        self.views.push(view);
        self
    }

    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    pub fn implementation_class(&self) -> &ClassName {
        &self.implementation_class
    }

    pub fn views(&self) -> &[ViewDescription] {
        &self.views
    }

    pub fn view(&self, name: &ViewName) -> Option<&ViewDescription> {
        self.views.iter().find(|view| view.name() == name)
    }
}
