//! In-process tag filtering.
//!
//! Used as the safety net whenever a retrieval path could not (or cannot
//! be trusted to have) enforced the tag constraint natively.

use std::collections::HashSet;

use crate::core::types::TagOperator;

/// Decide whether an item's tag names satisfy the required set.
///
/// AND requires every required tag, OR requires at least one. An empty
/// required set always matches; callers should check emptiness before
/// fetching item tags at all.
pub fn matches(item_tags: &HashSet<&str>, required: &[String], mode: TagOperator) -> bool {
    if required.is_empty() {
        return true;
    }
    let hits = required
        .iter()
        .filter(|name| item_tags.contains(name.as_str()))
        .count();
    match mode {
        TagOperator::And => hits == required.len(),
        TagOperator::Or => hits > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&'static str]) -> HashSet<&'static str> {
        names.iter().copied().collect()
    }

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn and_requires_every_tag() {
        let item = set(&["x", "y"]);
        assert!(matches(&item, &required(&["x", "y"]), TagOperator::And));
        assert!(!matches(&item, &required(&["x", "y", "z"]), TagOperator::And));

        let partial = set(&["x"]);
        assert!(!matches(&partial, &required(&["x", "y"]), TagOperator::And));
    }

    #[test]
    fn or_requires_any_tag() {
        let item = set(&["x"]);
        assert!(matches(&item, &required(&["x", "y"]), TagOperator::Or));
        assert!(!matches(&item, &required(&["y", "z"]), TagOperator::Or));
    }

    #[test]
    fn empty_required_set_is_a_noop() {
        let item = set(&[]);
        assert!(matches(&item, &[], TagOperator::And));
        assert!(matches(&item, &[], TagOperator::Or));
    }
}
