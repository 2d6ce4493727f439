//! Strongly-typed names and identifiers used across the workspace.

use core::str::FromStr;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of a deployed component (the unit that owns security metadata).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentName(Cow<'static, str>);

/// Name of a view: one exposed interface of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewName(Cow<'static, str>);

/// Fully qualified name of an implementation class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(Cow<'static, str>);

macro_rules! impl_name_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $t {
            fn from(value: &'static str) -> Self {
                Self(Cow::Borrowed(value))
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(Cow::Owned(value))
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_name_newtype!(ComponentName);
impl_name_newtype!(ViewName);
impl_name_newtype!(ClassName);

/// Identifier of one deployment-processing run.
///
/// Stamped onto resolved metadata so logs and audit output can be correlated
/// with the run that produced them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(Uuid);

impl DeploymentId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for DeploymentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<DeploymentId> for Uuid {
    fn from(value: DeploymentId) -> Self {
        value.0
    }
}

impl FromStr for DeploymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_compare_by_value() {
        assert_eq!(ClassName::from("com.acme.Teller"), ClassName::new("com.acme.Teller".to_string()));
        assert_ne!(ViewName::from("TellerLocal"), ViewName::from("TellerRemote"));
    }

    #[test]
    fn names_serialize_transparently() {
        let json = serde_json::to_string(&ComponentName::from("teller")).unwrap();
        assert_eq!(json, "\"teller\"");
    }

    #[test]
    fn deployment_id_round_trips_through_str() {
        let id = DeploymentId::new();
        let parsed: DeploymentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn deployment_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<DeploymentId>().is_err());
    }
}
