//! Environment variable access
//!
//! The resolver reads variables through [`Environment`] instead of calling
//! `std::env` directly, so tests can hand it a plain map.

use std::collections::HashMap;

pub trait Environment {
    /// Value of `key`, or `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, treating an empty string as unset
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
