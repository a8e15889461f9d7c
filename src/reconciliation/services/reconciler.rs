use crate::reconciliation::domain::{PendingVersionList, RawVersionSet};
use std::collections::{BTreeSet, HashSet};

/// ReconciliationEngine computes pending versions for one product on one instance
///
/// Pending = master catalog minus everything any applied source reports,
/// compared by exact string equality. Patch-log entries must already be
/// decoded before they are passed in.
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Set difference of `master` and the union of `applied`.
    ///
    /// The result is de-duplicated and sorted in plain lexicographic string
    /// order, so `"9.10"` sorts before `"9.2"`. An empty difference yields the
    /// single-blank placeholder list.
    pub fn reconcile(master: &RawVersionSet, applied: &[RawVersionSet]) -> PendingVersionList {
        let installed: HashSet<&str> = applied
            .iter()
            .flat_map(RawVersionSet::iter)
            .map(String::as_str)
            .collect();

        let pending: BTreeSet<&str> = master
            .iter()
            .map(String::as_str)
            .filter(|version| !installed.contains(version))
            .collect();

        PendingVersionList::from_sorted(pending.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(versions: &[&str]) -> RawVersionSet {
        versions.iter().copied().collect()
    }

    #[test]
    fn test_difference_across_sources() {
        let master = set(&["9.0", "9.1", "9.2"]);
        let applied = vec![set(&["9.0"]), set(&["9.1"]), set(&["9"]), set(&[])];

        let pending = ReconciliationEngine::reconcile(&master, &applied);
        assert_eq!(pending.rows(), &["9.2".to_string()]);
    }

    #[test]
    fn test_result_is_sorted_lexicographically_and_deduplicated() {
        let master = set(&["9.2", "9.10", "9.2", "10.0", "9.1"]);
        let pending = ReconciliationEngine::reconcile(&master, &[]);
        assert_eq!(pending.rows(), &["10.0", "9.1", "9.10", "9.2"].map(String::from));
    }

    #[test]
    fn test_result_is_subset_of_master_and_disjoint_from_applied() {
        let master = set(&["8.1", "8.2", "8.3", "8.4"]);
        let applied = vec![set(&["8.2", "7.0"]), set(&["8.4", "8.4"])];

        let pending = ReconciliationEngine::reconcile(&master, &applied);
        for version in pending.versions() {
            assert!(master.iter().any(|m| m == version));
            assert!(applied.iter().all(|a| a.iter().all(|v| v != version)));
        }
        assert_eq!(pending.versions().len(), 2);
    }

    #[test]
    fn test_empty_difference_is_placeholder() {
        let master = set(&["9.0", "9.1"]);
        let applied = vec![set(&["9.1", "9.0"])];

        let pending = ReconciliationEngine::reconcile(&master, &applied);
        assert!(pending.is_placeholder());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_exact_string_equality_only() {
        let master = set(&["9.0", "9.00"]);
        let applied = vec![set(&["9.0"])];

        let pending = ReconciliationEngine::reconcile(&master, &applied);
        assert_eq!(pending.rows(), &["9.00".to_string()]);
    }
}
