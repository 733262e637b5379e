//! Priority filtering - block-list policy plus the shared gating function.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::Priority;

/// A block-list of priorities.
///
/// Membership means *suppressed*; an empty filter lets everything pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityFilter {
    blocked: HashSet<Priority>,
}

impl PriorityFilter {
    /// A filter that passes everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A filter blocking the given priorities.
    pub fn blocking(priorities: impl IntoIterator<Item = Priority>) -> Self {
        Self {
            blocked: priorities.into_iter().collect(),
        }
    }

    /// Add a priority to the block-list.
    pub fn block(&mut self, priority: Priority) -> &mut Self {
        self.blocked.insert(priority);
        self
    }

    /// Whether this priority is suppressed.
    pub fn blocks(&self, priority: Priority) -> bool {
        self.blocked.contains(&priority)
    }

    /// Whether this priority passes the filter.
    pub fn allows(&self, priority: Priority) -> bool {
        !self.blocks(priority)
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}

impl FromIterator<Priority> for PriorityFilter {
    fn from_iter<I: IntoIterator<Item = Priority>>(iter: I) -> Self {
        Self::blocking(iter)
    }
}

/// The single shared gate used by every sink.
///
/// A sink carrying its own filter is judged against it alone; a sink
/// without one delegates to the dispatcher's default filter. Returns
/// true when the event is allowed to proceed.
pub fn gate(own: Option<&PriorityFilter>, fallback: &PriorityFilter, priority: Priority) -> bool {
    match own {
        Some(filter) => filter.allows(priority),
        None => fallback.allows(priority),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = PriorityFilter::empty();
        for priority in Priority::ALL {
            assert!(filter.allows(priority));
        }
    }

    #[test]
    fn test_blocked_priority_is_suppressed() {
        let filter = PriorityFilter::blocking([Priority::Debug, Priority::Verbose]);
        assert!(filter.blocks(Priority::Debug));
        assert!(filter.blocks(Priority::Verbose));
        assert!(filter.allows(Priority::Info));
        assert!(filter.allows(Priority::Fatal));
    }

    #[test]
    fn test_gate_without_own_filter_uses_fallback() {
        let fallback = PriorityFilter::blocking([Priority::Info]);
        for priority in Priority::ALL {
            assert_eq!(gate(None, &fallback, priority), fallback.allows(priority));
        }
    }

    #[test]
    fn test_gate_with_own_filter_ignores_fallback() {
        let fallback = PriorityFilter::blocking(Priority::ALL);
        let own = PriorityFilter::blocking([Priority::Warn]);
        assert!(gate(Some(&own), &fallback, Priority::Error));
        assert!(!gate(Some(&own), &fallback, Priority::Warn));
        // an empty own filter overrides a blocking fallback
        let open = PriorityFilter::empty();
        assert!(gate(Some(&open), &fallback, Priority::Verbose));
    }
}
