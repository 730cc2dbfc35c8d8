//! Group entity and its parallelism policy.

use super::ServiceSpec;
use serde::{Deserialize, Serialize};

/// Declared parallelism of a group.
///
/// Stored as an optional boolean in the workspace file: a missing (or `null`)
/// value is `Unset`, which runs in parallel unless an ancestor is sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Parallelism {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl Parallelism {
    /// Check if no value was declared
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Declared value, with `Unset` meaning parallel
    pub fn or_default(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl From<Option<bool>> for Parallelism {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
        }
    }
}

impl From<Parallelism> for Option<bool> {
    fn from(value: Parallelism) -> Self {
        match value {
            Parallelism::Unset => None,
            Parallelism::Enabled => Some(true),
            Parallelism::Disabled => Some(false),
        }
    }
}

/// A named, ordered collection of service specs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
    /// Parent group whose services run first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Parallelism::is_unset")]
    pub parallel: Parallelism,
}

impl Group {
    /// Create a group from plain service specs
    pub fn new<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            services: services
                .into_iter()
                .map(|s| ServiceSpec::parse(s.as_ref()))
                .collect(),
            ..Self::default()
        }
    }

    /// Set the parent group
    pub fn extending(mut self, parent: &str) -> Self {
        self.extends = Some(parent.to_string());
        self
    }

    /// Set the declared parallelism
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel).into();
        self
    }

    /// Parent group name; an empty `extends` counts as none
    pub fn parent(&self) -> Option<&str> {
        self.extends.as_deref().filter(|name| !name.is_empty())
    }
}
