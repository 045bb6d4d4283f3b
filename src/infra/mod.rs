//! Infrastructure layer
//!
//! Side-effectful collaborators: filesystem, the external git and cmake
//! tools. The lifecycle consumes these through traits so tests can swap in
//! recording fakes.

pub mod cmake;
pub mod filesystem;
pub mod git;
