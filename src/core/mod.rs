//! Core orchestration logic
//!
//! Pure decision logic: configuration, validation, requirement resolution,
//! the build-option transform, link ordering and the lifecycle state
//! machine. Nothing in here spawns processes; the lifecycle reaches the
//! outside world only through the traits it is handed.

pub mod build_options;
pub mod lifecycle;
pub mod linker;
pub mod options;
pub mod platform;
pub mod recipe;
pub mod requirements;
pub mod source;
pub mod validate;
