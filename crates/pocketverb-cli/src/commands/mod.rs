//! CLI command implementations.

pub mod common;
pub mod impulse;
pub mod info;
pub mod process;
pub mod rooms;
