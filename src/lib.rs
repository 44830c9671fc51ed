//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one path so shells and tests can use
//! `blockfall::{core,runtime,types}`.

pub use blockfall_core as core;
pub use blockfall_runtime as runtime;
pub use blockfall_types as types;
