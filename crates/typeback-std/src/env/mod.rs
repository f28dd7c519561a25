mod read_env;
mod system;

#[cfg(any(test, feature = "test-support"))]
mod mem;

pub use read_env::ReadEnv;
pub use system::SystemEnv;

#[cfg(any(test, feature = "test-support"))]
pub use mem::InMemoryEnv;
