//! Shared fixtures for the integration tests.

pub mod fixtures;
pub mod request_helpers;
