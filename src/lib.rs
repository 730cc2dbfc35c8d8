//! dcm: docker compose orchestration across a workspace of projects
//!
//! This crate resolves named groups of compose services (with single-parent
//! inheritance) and brings them up in parallel or in order.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::ToolConfig;
pub use error::{AppError, Result};
