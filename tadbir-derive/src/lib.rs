//! Derive macros for Tadbir behaviors.
//!
//! Generated code refers to the `tadbir` facade by default, so
//! depending on `tadbir` alone is enough. Crates built directly on
//! `tadbir-container` add `#[behavior(crate = "tadbir_container")]`.

pub use tadbir_macros::BehaviorKind;
