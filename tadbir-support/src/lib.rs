//! # Tadbir Support
//!
//! Shared utilities for the Tadbir settlement crates.
//!
//! This crate provides:
//! - Text rendering and "did you mean?" suggestions for error messages
//! - Tracing subscriber setup for binaries

pub mod logging;
pub mod rendering;
