use crate::reconciliation::domain::ComparisonMatrix;

/// PendingReleasesResponse - Output of the find-pending-releases use case
///
/// Carries everything a formatter needs to render the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReleasesResponse {
    /// Pending versions per product, one column per instance
    pub matrix: ComparisonMatrix,
    /// Width of the product-name column
    pub product_column_width: usize,
}

impl PendingReleasesResponse {
    pub fn new(matrix: ComparisonMatrix, product_column_width: usize) -> Self {
        Self {
            matrix,
            product_column_width,
        }
    }
}
