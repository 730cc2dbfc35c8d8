//! Workspace document: the declared projects and groups.

use super::{Group, Project};
use crate::error::{WorkspaceError, WorkspaceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Root aggregate loaded from the workspace file.
///
/// Read-only after load; shared by concurrent invocations through an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,
    #[serde(default)]
    pub groups: BTreeMap<String, Group>,
    /// Directory containing the workspace file
    #[serde(skip)]
    pub root: PathBuf,
}

impl Workspace {
    /// Load a workspace file; relative project paths resolve against its directory
    pub fn load(path: &Path) -> WorkspaceResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => WorkspaceError::NotFound(path.to_path_buf()),
            _ => WorkspaceError::Io(e),
        })?;

        let mut workspace: Workspace =
            serde_json::from_str(&content).map_err(|source| WorkspaceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        workspace.root = path.parent().map(Path::to_path_buf).unwrap_or_default();

        tracing::debug!(
            "Loaded workspace {:?}: {} project(s), {} group(s)",
            path,
            workspace.projects.len(),
            workspace.groups.len()
        );
        Ok(workspace)
    }

    /// Find the workspace file by walking up from `start`
    pub fn discover(start: &Path, file_name: &str) -> Option<PathBuf> {
        let mut current = start;
        loop {
            let candidate = current.join(file_name);
            if candidate.is_file() {
                return Some(candidate);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Write this workspace to a new file, refusing to overwrite
    pub fn create(&self, path: &Path) -> WorkspaceResult<()> {
        if path.exists() {
            return Err(WorkspaceError::AlreadyExists(path.to_path_buf()));
        }

        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// Starter document written by `init`
    pub fn starter() -> Self {
        let mut projects = BTreeMap::new();
        projects.insert(
            "example".to_string(),
            Project::new("./services/example", "Example project"),
        );

        let mut groups = BTreeMap::new();
        groups.insert("dev".to_string(), Group::new(["example"]));

        Self {
            version: "1.0".to_string(),
            projects,
            groups,
            root: PathBuf::new(),
        }
    }

    /// Look up a project by name
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Directory a project's compose commands run in
    pub fn project_dir(&self, project: &Project) -> PathBuf {
        self.root.join(&project.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Parallelism;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
  "version": "1.0",
  "projects": {
    "test": { "path": "./test", "description": "Test Project" }
  },
  "groups": {
    "test-group": { "services": ["test"] },
    "seq": { "services": ["test:web"], "extends": "test-group", "parallel": false }
  }
}"#;

    #[test]
    fn test_load_workspace() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workspace.json");
        fs::write(&path, SAMPLE).unwrap();

        let ws = Workspace::load(&path).unwrap();
        assert_eq!(ws.version, "1.0");
        assert_eq!(ws.root, temp.path());
        assert_eq!(ws.project("test").unwrap().description, "Test Project");
        assert_eq!(ws.group("test-group").unwrap().parallel, Parallelism::Unset);
        assert_eq!(ws.group("seq").unwrap().parallel, Parallelism::Disabled);
        assert_eq!(ws.group("seq").unwrap().parent(), Some("test-group"));
    }

    #[test]
    fn test_project_dir_is_relative_to_root() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workspace.json");
        fs::write(&path, SAMPLE).unwrap();

        let ws = Workspace::load(&path).unwrap();
        let project = ws.project("test").unwrap();
        assert_eq!(ws.project_dir(project), temp.path().join("./test"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Workspace::load(&temp.path().join("workspace.json")).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workspace.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Workspace::load(&path).unwrap_err();
        assert!(matches!(err, WorkspaceError::Parse { .. }));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("workspace.json"), SAMPLE).unwrap();
        let nested = temp.path().join("services").join("api");
        fs::create_dir_all(&nested).unwrap();

        let found = Workspace::discover(&nested, "workspace.json").unwrap();
        assert_eq!(found, temp.path().join("workspace.json"));
        assert!(Workspace::discover(&nested, "other.json").is_none());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workspace.json");

        Workspace::starter().create(&path).unwrap();
        let loaded = Workspace::load(&path).unwrap();
        assert_eq!(loaded.version, "1.0");
        assert!(loaded.project("example").is_some());
        assert_eq!(loaded.group("dev").unwrap().services.len(), 1);

        let err = Workspace::starter().create(&path).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }
}
