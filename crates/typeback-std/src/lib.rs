//! Zero-cost abstractions over `std` for typeback.
//!
//! | Concern  | Trait       | Production    | Test            |
//! |----------|-------------|---------------|-----------------|
//! | Env vars | [`ReadEnv`] | [`SystemEnv`] | [`InMemoryEnv`]* |
//!
//! *Available with `#[cfg(test)]` or the `"test-support"` feature.
//!
//! [`SystemEnv`] is zero-sized and trivially `Send + Sync`.
//! [`InMemoryEnv`] is backed by a `RefCell<HashMap>` and is not.

pub mod env;

pub use env::{ReadEnv, SystemEnv};

#[cfg(any(test, feature = "test-support"))]
pub use env::InMemoryEnv;
