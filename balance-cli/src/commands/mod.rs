//! CLI command implementations.

pub mod config;
pub mod credentials;
#[cfg(feature = "examples")]
pub mod examples;
pub mod link;
pub mod refresh;
pub mod reset;
pub mod truelayer;
