use crate::reconciliation::domain::{InstanceReport, PendingVersionList};
use crate::shared::error::ReleaseError;

/// Maximum number of instances compared side by side
pub const MAX_INSTANCES: usize = 3;

/// One product line of the comparison: a pending list per active instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    product: String,
    cells: Vec<PendingVersionList>,
}

impl MatrixRow {
    pub fn product(&self) -> &str {
        &self.product
    }

    /// One pending list per instance, in column order
    pub fn cells(&self) -> &[PendingVersionList] {
        &self.cells
    }

    /// Number of display lines this product needs (longest cell)
    pub fn sub_row_count(&self) -> usize {
        self.cells.iter().map(PendingVersionList::len).max().unwrap_or(0)
    }

    /// Display lines, one value per instance.
    ///
    /// Alignment is purely positional: line `i` holds each instance's `i`-th
    /// pending version, blank where an instance has fewer. Versions on the
    /// same line are not claimed to correspond to each other.
    pub fn sub_rows(&self) -> Vec<Vec<&str>> {
        (0..self.sub_row_count())
            .map(|i| self.cells.iter().map(|cell| cell.row(i)).collect())
            .collect()
    }
}

/// Per-product pending versions of up to three instances, row-aligned for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonMatrix {
    labels: Vec<String>,
    rows: Vec<MatrixRow>,
}

impl ComparisonMatrix {
    /// Aggregates 1 to 3 instance reports.
    ///
    /// Rows follow the first report's products in its order; a product
    /// missing from a later report gets the placeholder list in that column.
    /// Labels must be distinct.
    pub fn build(reports: Vec<InstanceReport>) -> Result<Self, ReleaseError> {
        if reports.is_empty() || reports.len() > MAX_INSTANCES {
            return Err(ReleaseError::Validation {
                message: format!(
                    "A comparison needs between 1 and {} instance reports, got {}",
                    MAX_INSTANCES,
                    reports.len()
                ),
            });
        }

        let labels: Vec<String> = reports.iter().map(|r| r.label().to_string()).collect();
        if let Some(duplicate) = labels
            .iter()
            .enumerate()
            .find_map(|(i, label)| labels[..i].contains(label).then_some(label))
        {
            return Err(ReleaseError::Validation {
                message: format!("Instance label '{}' is used more than once", duplicate),
            });
        }

        let (first, rest) = reports.split_at(1);
        let rows = first[0]
            .entries()
            .map(|(product, pending)| {
                let mut cells = Vec::with_capacity(reports.len());
                cells.push(pending.clone());
                cells.extend(rest.iter().map(|report| {
                    report
                        .get(product)
                        .cloned()
                        .unwrap_or_else(PendingVersionList::placeholder)
                }));
                MatrixRow {
                    product: product.clone(),
                    cells,
                }
            })
            .collect();

        Ok(Self { labels, rows })
    }

    /// Active instance labels in configured order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }
}
