use std::env;

/// Read a process environment variable.
///
/// Deliberately shaped like `std::env::var` so call sites read the same
/// whether they hold the real environment or a test double. Production
/// code uses [`SystemEnv`](super::SystemEnv); tests swap in `InMemoryEnv`
/// without touching the process environment.
///
/// No `Send + Sync` supertraits — add those bounds at the call site if a
/// spawned task needs them.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}
