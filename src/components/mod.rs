//! Reusable view components.

pub mod hero;
pub mod network;
