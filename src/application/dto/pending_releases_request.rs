use crate::reconciliation::domain::{CatalogFilter, ProductSelection};

/// PendingReleasesRequest - Input of the find-pending-releases use case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReleasesRequest {
    /// Products to reconcile
    pub selection: ProductSelection,
    /// Which master catalog releases count
    pub catalog_filter: CatalogFilter,
}

impl PendingReleasesRequest {
    pub fn new(selection: ProductSelection, catalog_filter: CatalogFilter) -> Self {
        Self {
            selection,
            catalog_filter,
        }
    }
}
