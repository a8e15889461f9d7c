use crate::reconciliation::domain::{ProductCatalog, ProductSelection};
use crate::shared::Result;

/// ProductSelector port for choosing which products to reconcile
pub trait ProductSelector {
    /// Asks which products to check
    ///
    /// # Returns
    /// `Some(selection)`, or `None` when the user chose to quit
    ///
    /// # Errors
    /// Returns `InvalidSelection` for input that is neither a valid index,
    /// "all" nor "quit"; the run is aborted rather than re-prompted.
    fn select(&self, catalog: &ProductCatalog) -> Result<Option<ProductSelection>>;
}
