//! Plain-text reports for `list` and `inspect`.

use crate::domain::{Parallelism, Workspace};
use crate::services::Resolution;
use std::fmt::Write;

/// Projects with their descriptions, then groups with their shape
pub fn render_list(workspace: &Workspace) -> String {
    let mut out = String::from("Projects:\n");
    for (name, project) in &workspace.projects {
        if project.description.is_empty() {
            let _ = writeln!(out, "  - {}", name);
        } else {
            let _ = writeln!(out, "  - {}: {}", name, project.description);
        }
    }

    out.push_str("\nGroups:\n");
    for (name, group) in &workspace.groups {
        let mut details = vec![format!("{} service(s)", group.services.len())];
        if let Some(parent) = group.parent() {
            details.push(format!("extends '{}'", parent));
        }
        match group.parallel {
            Parallelism::Enabled => details.push("parallel".to_string()),
            Parallelism::Disabled => details.push("sequential".to_string()),
            Parallelism::Unset => {}
        }
        let _ = writeln!(out, "  - {}: {}", name, details.join(", "));
    }

    out.trim_end().to_string()
}

/// Effective parallelism and execution order of a resolved group
pub fn render_inspect(group_name: &str, resolution: &Resolution, workspace: &Workspace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Group: {}", group_name);
    let _ = writeln!(out, "Parallel: {}", resolution.parallel);
    out.push_str("\nExecution order:\n");

    for (i, spec) in resolution.services.iter().enumerate() {
        let path = match workspace.project(spec.project()) {
            Some(project) => project.path.display().to_string(),
            None => "(undeclared project)".to_string(),
        };
        let _ = writeln!(out, "{}. {}", i + 1, spec);
        let _ = writeln!(out, "   Path: {}", path);
        let _ = writeln!(out, "   Service: {}", spec.service().unwrap_or("all"));
    }

    out.trim_end().to_string()
}
