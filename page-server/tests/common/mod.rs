//! Shared integration test utilities.

pub mod server;
