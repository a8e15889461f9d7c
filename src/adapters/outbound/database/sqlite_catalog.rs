use crate::ports::outbound::ReleaseSource;
use crate::reconciliation::domain::{CatalogFilter, RawVersionSet, ReleaseQuery};
use crate::shared::error::ReleaseError;
use crate::shared::Result;
use log::{debug, info};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

/// Generally-available releases of one product
const GA_RELEASES_SQL: &str =
    "SELECT release_version FROM release WHERE status = 'GA' AND product_id = ?1";

/// Every non-obsolete release of one product
const NON_OBSOLETE_RELEASES_SQL: &str =
    "SELECT release_version FROM release WHERE status != 'OBSOLETE' AND product_id = ?1";

/// Columns the catalog must provide; checked once at connect time
const SCHEMA_PROBE_SQL: &str = "SELECT release_version, status, product_id FROM release LIMIT 0";

/// SqliteReleaseCatalog adapter for the master release catalog
///
/// Opens the catalog database read-only. Only `ReleaseQuery::Catalog` is
/// supported; the filter picks between the GA-only and non-obsolete queries.
pub struct SqliteReleaseCatalog {
    name: String,
    conn: Connection,
}

impl SqliteReleaseCatalog {
    /// Opens the catalog and checks that it has a `release` table
    ///
    /// # Errors
    /// `Connection` if the file is missing, unreadable or not a release catalog
    pub fn open(path: &Path) -> Result<Self> {
        let name = path.display().to_string();
        let connection_error = |details: String| ReleaseError::Connection {
            source_name: name.clone(),
            details,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| connection_error(e.to_string()))?;

        conn.prepare(SCHEMA_PROBE_SQL)
            .map_err(|e| connection_error(format!("not a release catalog: {}", e)))?;

        info!("Opened release catalog {}", name);
        Ok(Self { name, conn })
    }

    fn query_releases(&self, sql: &str, product_id: &str) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params![product_id], |row| row.get::<_, Option<String>>(0))?;
        let versions = rows.filter_map(|row| row.transpose()).collect();
        versions
    }
}

impl ReleaseSource for SqliteReleaseCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, query: &ReleaseQuery) -> Result<RawVersionSet> {
        let (sql, product_id) = match query {
            ReleaseQuery::Catalog {
                product_id,
                filter: CatalogFilter::GaOnly,
            } => (GA_RELEASES_SQL, product_id),
            ReleaseQuery::Catalog {
                product_id,
                filter: CatalogFilter::ExcludeObsolete,
            } => (NON_OBSOLETE_RELEASES_SQL, product_id),
            other => {
                return Err(ReleaseError::SourceUnavailable {
                    source_name: self.name.clone(),
                    query: other.to_string(),
                    details: "the release catalog only answers catalog queries".to_string(),
                }
                .into())
            }
        };

        debug!("{}: {} [{}]", self.name, sql, product_id);
        let versions = self.query_releases(sql, product_id).map_err(|e| {
            ReleaseError::SourceUnavailable {
                source_name: self.name.clone(),
                query: query.to_string(),
                details: e.to_string(),
            }
        })?;

        Ok(RawVersionSet::new(versions))
    }
}
