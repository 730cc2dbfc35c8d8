//! Orchestration services for dcm.
//!
//! This module contains:
//! - GroupResolver: Flattens group inheritance into an ordered service list
//! - CommandRunner: Runs one external command
//! - ServiceInvoker: Issues one compose invocation
//! - BatchExecutor: Runs invocations in parallel or in order
//! - validator: Static workspace checks

pub mod executor;
pub mod invoker;
pub mod resolver;
pub mod runner;
pub mod validator;

pub use executor::BatchExecutor;
pub use invoker::{ExecutionContext, ServiceInvoker};
pub use resolver::{GroupResolver, Resolution};
pub use runner::{CommandRunner, OutputMode, ProcessRunner};
pub use validator::{validate, ValidationIssue};
