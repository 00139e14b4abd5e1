use std::collections::HashMap;

use serde::Serialize;

/// In-memory counter table: name -> value.
///
/// Names that were never incremented are not stored and read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CounterTable {
    counters: HashMap<String, u64>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, 0 for unseen names.
    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Add one to `name` (materializing it at 0 first) and return the new value.
    /// Saturates at `u64::MAX`.
    pub fn increment(&mut self, name: &str) -> u64 {
        let slot = self.counters.entry(name.to_string()).or_insert(0);
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn contains(&self, name: &str) -> bool {
        self.counters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl FromIterator<(String, u64)> for CounterTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().collect(),
        }
    }
}
