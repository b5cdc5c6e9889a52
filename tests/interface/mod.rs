//! Interface generation across modules
//!
//! Tests for:
//! - Overlay modules found on `-I` search paths
//! - Cursor info on symbols declared outside the printed module

pub mod tests_overlays;
