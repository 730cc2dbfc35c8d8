//! Service specifier used inside groups.

use serde::{Deserialize, Serialize};

/// A `project` or `project:service` reference.
///
/// The project name is not checked here; lookups against the workspace
/// report a missing project when the spec is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceSpec(String);

impl ServiceSpec {
    /// Wrap a raw specifier
    pub fn parse(s: &str) -> Self {
        Self(s.to_string())
    }

    /// Project portion (everything before the first `:`)
    pub fn project(&self) -> &str {
        match self.0.split_once(':') {
            Some((project, _)) => project,
            None => &self.0,
        }
    }

    /// Target compose service, if one is named
    pub fn service(&self) -> Option<&str> {
        self.0
            .split_once(':')
            .map(|(_, service)| service)
            .filter(|service| !service.is_empty())
    }

    /// Get the full specifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ServiceSpec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceSpec {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
