use crate::reconciliation::domain::{RawVersionSet, ReleaseQuery};
use crate::shared::Result;

/// ReleaseSource port for fetching version strings from a data source
///
/// This port abstracts the databases that know about releases: the master
/// catalog and the per-instance "already applied" tables. Calls are
/// synchronous and blocking.
pub trait ReleaseSource {
    /// Human-readable name of the source, used in diagnostics and as the
    /// column label for instances
    fn name(&self) -> &str;

    /// Runs one release query
    ///
    /// # Arguments
    /// * `query` - The query variant, carrying the source-specific product key
    ///
    /// # Returns
    /// Every version-bearing string the source reported, in no particular order
    ///
    /// # Errors
    /// Returns `SourceUnavailable` if the query fails or the source does not
    /// support the requested variant. Callers treat this as fatal.
    fn fetch(&self, query: &ReleaseQuery) -> Result<RawVersionSet>;
}
