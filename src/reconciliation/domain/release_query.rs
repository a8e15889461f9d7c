use std::fmt;

/// Which master catalog releases count as "known"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFilter {
    /// Only releases flagged generally available
    GaOnly,
    /// Everything except releases flagged obsolete
    ExcludeObsolete,
}

impl CatalogFilter {
    pub fn from_ga_only(ga_releases_only: bool) -> Self {
        if ga_releases_only {
            CatalogFilter::GaOnly
        } else {
            CatalogFilter::ExcludeObsolete
        }
    }
}

/// The closed set of release queries a data source can be asked to run.
///
/// Each variant carries the source-specific product key it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReleaseQuery {
    /// Master catalog releases for a product
    Catalog {
        product_id: String,
        filter: CatalogFilter,
    },
    /// Releases recorded by database upgrades on an instance
    DeployedDatabase { application: String },
    /// Releases recorded by application deployments on an instance
    DeployedApplication { application: String },
    /// Encoded patch identifiers recorded on an instance
    PatchLog { patch_key: String },
    /// Legacy per-product version table on an instance
    VersionTable { table: String },
}

impl fmt::Display for ReleaseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseQuery::Catalog { product_id, filter } => {
                let scope = match filter {
                    CatalogFilter::GaOnly => "GA only",
                    CatalogFilter::ExcludeObsolete => "excluding obsolete",
                };
                write!(f, "catalog releases for {} ({})", product_id, scope)
            }
            ReleaseQuery::DeployedDatabase { application } => {
                write!(f, "deployed database releases for {}", application)
            }
            ReleaseQuery::DeployedApplication { application } => {
                write!(f, "deployed application releases for {}", application)
            }
            ReleaseQuery::PatchLog { patch_key } => write!(f, "patch log for {}", patch_key),
            ReleaseQuery::VersionTable { table } => write!(f, "version table {}", table),
        }
    }
}
