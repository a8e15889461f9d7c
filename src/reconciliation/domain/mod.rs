pub mod comparison_matrix;
pub mod product;
pub mod release_query;
pub mod version_sets;

pub use comparison_matrix::{ComparisonMatrix, MatrixRow, MAX_INSTANCES};
pub use product::{ProductCatalog, ProductDescriptor, ProductSelection};
pub use release_query::{CatalogFilter, ReleaseQuery};
pub use version_sets::{InstanceReport, PendingVersionList, RawVersionSet};
