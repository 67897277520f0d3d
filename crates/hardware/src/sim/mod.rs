//! Program loading and harness-side helpers.
//!
//! Provides the hex program loader and pure rendering of machine state for
//! harnesses that display it.

pub mod loader;
pub mod render;
