//! `gantry-security` — deployment-time resolution of method security metadata.
//!
//! This crate turns per-view security facts into the effective access-control
//! metadata of every exposed method, once, while a component deploys.
//! Parsing descriptors into facts and enforcing the resolved metadata against
//! callers both live outside this crate, on either side of the
//! [`SecurityDescriptorStore`] seam.

pub mod deployment;
pub mod descriptor;
pub mod metadata;
pub mod roles;

pub use deployment::{ComponentSecurityMetadata, ViewSecurityMetadata, resolve_component_security};
pub use descriptor::{ComponentSecurityDescription, SecurityDescriptorStore};
pub use metadata::MethodSecurityMetadata;
pub use roles::Role;
