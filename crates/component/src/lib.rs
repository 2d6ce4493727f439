//! `gantry-component` — structural metadata of deployed components.
//!
//! Classes, views, and component descriptions: the shape of what is deployed,
//! decoupled from how its security facts are stored or resolved.

pub mod class;
pub mod component;
pub mod view;

pub use class::{ClassMetadata, ClassRegistry, ResolvedMethod};
pub use component::ComponentDescription;
pub use view::ViewDescription;
