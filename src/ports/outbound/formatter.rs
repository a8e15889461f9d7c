use crate::application::dto::PendingReleasesResponse;
use crate::shared::Result;

/// ReportFormatter port for rendering the comparison
///
/// This port abstracts the output format (bordered text table, JSON).
pub trait ReportFormatter {
    /// Formats the comparison matrix of a run
    ///
    /// # Arguments
    /// * `response` - Matrix plus the product-name column width
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &PendingReleasesResponse) -> Result<String>;
}
