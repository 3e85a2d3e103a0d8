//! End-to-end integration tests for the edgelens workspace.
//!
//! All tests live under `tests/`; this crate has no runtime code.
