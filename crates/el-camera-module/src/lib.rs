//! Edge camera module — library crate for the capture/connectivity runtime.
//!
//! Re-exports all modules so `el-e2e-tests` can exercise internal types
//! like `ModuleContext`, `MockCaptureSession`, and the event dispatcher.

pub mod capture;
pub mod config;
pub mod context;
pub mod events;
pub mod scan_loop;
pub mod signal;
