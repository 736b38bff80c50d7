//! Library components of the eICU dashboard CLI.
//!
//! Page assembly and rendering live here so they can be exercised without
//! spawning the binary.

pub mod logging;
pub mod pages;
pub mod render;
