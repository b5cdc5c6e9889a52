//! Request tests
//!
//! Tests for:
//! - interface-gen against checked-in responses
//! - interface-gen-open followed by cursor and find-usr
//! - Request failures

pub mod tests_cursor;
pub mod tests_interface_gen;
