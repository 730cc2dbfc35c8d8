//! Domain entities for dcm.
//!
//! This module contains the core entities:
//! - Workspace: The declared projects and groups
//! - Project: A compose-managed directory
//! - Group: An inheriting, ordered set of service specs
//! - ServiceSpec: A `project[:service]` reference
//! - ComposeAction: The compose sub-commands dcm issues

mod compose;
mod group;
mod project;
mod service_spec;
mod workspace;

pub use compose::{CommandLine, ComposeAction};
pub use group::{Group, Parallelism};
pub use project::Project;
pub use service_spec::ServiceSpec;
pub use workspace::Workspace;
