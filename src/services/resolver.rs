//! Group resolution: flattens an `extends` chain into an ordered service list.

use crate::domain::{Group, ServiceSpec, Workspace};
use crate::error::{ResolveError, ResolveResult};
use std::collections::HashSet;

/// Flattened result of resolving one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Inherited services first, then the group's own, in declaration order
    pub services: Vec<ServiceSpec>,
    /// Effective parallelism after inheritance
    pub parallel: bool,
}

/// Resolves groups against a loaded workspace
pub struct GroupResolver<'a> {
    workspace: &'a Workspace,
}

impl<'a> GroupResolver<'a> {
    /// Create a resolver over a workspace
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Resolve a group and its ancestors.
    ///
    /// A sequential ancestor makes every descendant sequential; a descendant
    /// cannot turn parallelism back on.
    pub fn resolve(&self, group_name: &str) -> ResolveResult<Resolution> {
        let chain = self.chain(group_name)?;

        let mut services = Vec::new();
        let mut parallel = true;
        for group in chain.iter().rev() {
            parallel = parallel && group.parallel.or_default();
            services.extend(group.services.iter().cloned());
        }

        tracing::debug!(
            "Resolved group '{}' to {} service(s), parallel={}",
            group_name,
            services.len(),
            parallel
        );
        Ok(Resolution { services, parallel })
    }

    /// Walk from `group_name` up to the root group, child first.
    ///
    /// The visited set lives only for this walk.
    fn chain(&self, group_name: &str) -> ResolveResult<Vec<&'a Group>> {
        let mut visited = HashSet::new();
        let mut chain = Vec::new();
        let mut current = Some(group_name);

        while let Some(name) = current {
            if !visited.insert(name) {
                return Err(ResolveError::Cycle(name.to_string()));
            }

            let group = self
                .workspace
                .group(name)
                .ok_or_else(|| ResolveError::GroupNotFound(name.to_string()))?;
            chain.push(group);
            current = group.parent();
        }

        Ok(chain)
    }
}
