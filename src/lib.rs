//! pending-releases - reconcile a master release catalog against deployed instances
//!
//! For each product, the master catalog lists every published release. Each
//! database instance records what it has applied in up to four places
//! (deployed database and application release tables, the patch log and a
//! per-product version table). A release is pending on an instance when no
//! source on that instance reports it. Up to three instances are compared
//! side by side.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`reconciliation`): products, version sets, patch decoding,
//!   reconciliation and the comparison matrix
//! - **Application Layer** (`application`): the use case, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): SQLite catalog, PostgreSQL instances, console and formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pending_releases::prelude::*;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let settings = load_settings(None, Path::new("."))?;
//!
//! // Create adapters
//! let catalog_source = SqliteReleaseCatalog::open(&settings.catalog_path)?;
//! let instances = settings
//!     .instances
//!     .iter()
//!     .map(|instance| PostgresInstanceSource::connect(instance, Duration::from_secs(30)))
//!     .collect::<Result<Vec<_>>>()?;
//!
//! // Create and execute the use case
//! let use_case = FindPendingReleasesUseCase::new(
//!     settings.products,
//!     catalog_source,
//!     instances,
//!     StderrProgressReporter::new(),
//! );
//! let request = PendingReleasesRequest::new(ProductSelection::All, settings.catalog_filter);
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let output = TableFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod reconciliation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, StdinProductSelector};
    pub use crate::adapters::outbound::database::{PostgresInstanceSource, SqliteReleaseCatalog};
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::application::dto::{
        OutputFormat, PendingReleasesRequest, PendingReleasesResponse,
    };
    pub use crate::application::use_cases::FindPendingReleasesUseCase;
    pub use crate::config::{load_settings, InstanceConfig, Settings};
    pub use crate::ports::outbound::{
        OutputPresenter, ProductSelector, ProgressReporter, ReleaseSource, ReportFormatter,
    };
    pub use crate::reconciliation::domain::{
        CatalogFilter, ComparisonMatrix, InstanceReport, PendingVersionList, ProductCatalog,
        ProductDescriptor, ProductSelection, RawVersionSet, ReleaseQuery,
    };
    pub use crate::reconciliation::services::{PatchVersionDecoder, ReconciliationEngine};
    pub use crate::shared::Result;
}
