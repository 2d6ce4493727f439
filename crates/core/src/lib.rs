//! `gantry-core` — shared metadata primitives.
//!
//! This crate contains **pure metadata** building blocks (names, method
//! identity, the deployment error model). Resolution logic lives in the
//! crates layered on top.

pub mod error;
pub mod id;
pub mod method;

pub use error::{DeploymentError, DeploymentResult};
pub use id::{ClassName, ComponentName, DeploymentId, ViewName};
pub use method::{MethodIdentifier, ViewIdentity};
