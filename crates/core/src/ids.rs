#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Sequential layer id. Assigned once at construction and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(u64);

impl LayerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide filter id. Monotonic; a deleted filter's id is never handed out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(u64);

impl FilterId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source. `next` hands out the current value and advances.
#[derive(Clone, Debug, Default)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn next_layer(&mut self) -> LayerId {
        LayerId(self.advance())
    }

    pub fn next_filter(&mut self) -> FilterId {
        FilterId(self.advance())
    }

    fn advance(&mut self) -> u64 {
        let value = self.next;
        self.next = self.next.saturating_add(1);
        value
    }
}
