//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine and the shared types so callers depend on a single
//! package while the implementation lives in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_types as types;
