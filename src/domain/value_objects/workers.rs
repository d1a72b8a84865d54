//! Workers value object - validated upper bound on deploy concurrency

use std::num::NonZeroUsize;

use crate::error::{KeelError, KeelResult};

/// Maximum number of concurrent deployment workers.
///
/// The controller only checks that the value is positive; how the
/// executor uses it is up to the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Workers(NonZeroUsize);

impl Workers {
    /// Validate a raw worker count as supplied by a caller.
    pub fn new(raw: i64) -> KeelResult<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(KeelError::InvalidWorkers(raw))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for Workers {
    fn default() -> Self {
        Self(NonZeroUsize::MIN)
    }
}

impl std::fmt::Display for Workers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
