//! Shared test utilities for the projgen workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: scripted [`FakeRunner`] and [`RecordingSink`]
//! - [`project`]: [`TestProject`] temp-dir fixture

pub mod fakes;
pub mod project;

pub use fakes::{FakeRunner, RecordingSink};
pub use project::TestProject;
