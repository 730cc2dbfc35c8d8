//! Static checks over a loaded workspace.

use super::resolver::GroupResolver;
use crate::domain::Workspace;
use crate::error::ResolveError;
use std::fmt;
use std::path::PathBuf;

/// A problem found in the workspace document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Project directory does not exist
    MissingPath { project: String, path: PathBuf },
    /// Group lists a service whose project is not declared
    UndeclaredProject { group: String, project: String },
    /// Group extends a group that is not declared
    UnknownParent { group: String, parent: String },
    /// Group's inheritance chain loops
    Cycle { group: String, at: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPath { project, path } => {
                write!(f, "Project '{}': path not found: {}", project, path.display())
            }
            Self::UndeclaredProject { group, project } => {
                write!(f, "Group '{}': project '{}' is not declared", group, project)
            }
            Self::UnknownParent { group, parent } => {
                write!(f, "Group '{}': extends unknown group '{}'", group, parent)
            }
            Self::Cycle { group, at } => {
                write!(f, "Group '{}': inheritance cycle at '{}'", group, at)
            }
        }
    }
}

/// Check project paths, service references and inheritance.
///
/// Project issues come first, then group issues, each ordered by name.
pub fn validate(workspace: &Workspace) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (name, project) in &workspace.projects {
        let dir = workspace.project_dir(project);
        if !dir.is_dir() {
            issues.push(ValidationIssue::MissingPath {
                project: name.clone(),
                path: project.path.clone(),
            });
        }
    }

    let resolver = GroupResolver::new(workspace);
    for (name, group) in &workspace.groups {
        for spec in &group.services {
            if workspace.project(spec.project()).is_none() {
                issues.push(ValidationIssue::UndeclaredProject {
                    group: name.clone(),
                    project: spec.project().to_string(),
                });
            }
        }

        if let Some(parent) = group.parent() {
            if workspace.group(parent).is_none() {
                issues.push(ValidationIssue::UnknownParent {
                    group: name.clone(),
                    parent: parent.to_string(),
                });
                continue;
            }
        }

        if let Err(ResolveError::Cycle(at)) = resolver.resolve(name) {
            issues.push(ValidationIssue::Cycle {
                group: name.clone(),
                at,
            });
        }
    }

    tracing::debug!("Validation found {} issue(s)", issues.len());
    issues
}
