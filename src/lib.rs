//! Buildsmith - declarative build-recipe orchestrator
//!
//! This library drives one C/C++ package from a declarative recipe through
//! a fixed lifecycle: validate the configuration, resolve build-time tool
//! requirements, fetch and transform upstream source, run CMake's
//! configure/build/install, and publish the link order of the produced
//! libraries.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Orchestration logic (no process spawning)
//! - [`infra`] - Infrastructure layer (filesystem, git, cmake)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
