use std::cell::RefCell;
use std::collections::HashMap;
use std::env::VarError;

use super::ReadEnv;

/// In-memory environment for tests. Not `Send + Sync` (RefCell-backed);
/// fine for single-threaded test bodies.
#[derive(Default)]
pub struct InMemoryEnv {
    vars: RefCell<HashMap<String, String>>,
}

impl InMemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn unset(&self, key: &str) {
        self.vars.borrow_mut().remove(key);
    }
}

impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.vars
            .borrow()
            .get(key)
            .cloned()
            .ok_or(VarError::NotPresent)
    }
}
