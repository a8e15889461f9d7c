use crate::config::InstanceConfig;
use crate::ports::outbound::ReleaseSource;
use crate::reconciliation::domain::{RawVersionSet, ReleaseQuery};
use crate::shared::error::ReleaseError;
use crate::shared::Result;
use anyhow::Context;
use log::{debug, info, warn};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::cell::RefCell;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

const DEPLOYED_DATABASE_SQL: &str =
    "SELECT gurwadb_release FROM gurwadb WHERE gurwadb_application_name = $1";

const DEPLOYED_APPLICATION_SQL: &str =
    "SELECT gurwapp_release FROM gurwapp WHERE gurwapp_application_name = $1";

const PATCH_LOG_SQL: &str = "SELECT gurpost_patch FROM gurpost WHERE gurpost_patch LIKE $1";

/// PostgreSQL has a 63-byte identifier limit
const MAX_IDENTIFIER_LEN: usize = 63;

/// PostgresInstanceSource answers applied-release queries for one instance
///
/// The adapter owns a single-threaded runtime and drives every sqlx call
/// with `block_on`, so callers stay synchronous. The connection is closed
/// gracefully when the adapter is dropped.
pub struct PostgresInstanceSource {
    label: String,
    runtime: Runtime,
    conn: RefCell<Option<PgConnection>>,
}

impl PostgresInstanceSource {
    /// Opens the instance connection, giving up after `timeout`
    ///
    /// # Errors
    /// `Connection` when the server is unreachable, rejects the login or
    /// does not answer in time.
    pub fn connect(instance: &InstanceConfig, timeout: Duration) -> Result<Self> {
        let label = instance.display_label().to_string();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the database runtime")?;

        let options = PgConnectOptions::new()
            .host(&instance.host)
            .port(instance.port)
            .database(&instance.name)
            .username(&instance.user)
            .password(&instance.password);

        debug!(
            "Connecting to {}:{}/{} (timeout {}s)",
            instance.host,
            instance.port,
            instance.name,
            timeout.as_secs()
        );

        let attempt = runtime.block_on(async {
            tokio::time::timeout(timeout, PgConnection::connect_with(&options)).await
        });

        let conn = match attempt {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => {
                return Err(ReleaseError::Connection {
                    source_name: label,
                    details: e.to_string(),
                }
                .into())
            }
            Err(_) => {
                return Err(ReleaseError::Connection {
                    source_name: label,
                    details: format!("timed out after {}s", timeout.as_secs()),
                }
                .into())
            }
        };

        info!("Connected to {} as {}", instance.name, instance.user);
        Ok(Self {
            label,
            runtime,
            conn: RefCell::new(Some(conn)),
        })
    }

    /// SQL text and optional bind value for an applied-release query
    fn statement(&self, query: &ReleaseQuery) -> Result<(String, Option<String>)> {
        let statement = match query {
            ReleaseQuery::DeployedDatabase { application } => (
                DEPLOYED_DATABASE_SQL.to_string(),
                Some(application.clone()),
            ),
            ReleaseQuery::DeployedApplication { application } => (
                DEPLOYED_APPLICATION_SQL.to_string(),
                Some(application.clone()),
            ),
            ReleaseQuery::PatchLog { patch_key } => {
                (PATCH_LOG_SQL.to_string(), Some(patch_log_pattern(patch_key)))
            }
            ReleaseQuery::VersionTable { table } => {
                if !is_valid_identifier(table) {
                    return Err(self.unavailable(query, "invalid version table name"));
                }
                (format!("SELECT {t}_release FROM {t}", t = table), None)
            }
            ReleaseQuery::Catalog { .. } => {
                return Err(self.unavailable(query, "catalog queries go to the release catalog"))
            }
        };
        Ok(statement)
    }

    fn unavailable(&self, query: &ReleaseQuery, details: impl Into<String>) -> anyhow::Error {
        ReleaseError::SourceUnavailable {
            source_name: self.label.clone(),
            query: query.to_string(),
            details: details.into(),
        }
        .into()
    }
}

impl ReleaseSource for PostgresInstanceSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self, query: &ReleaseQuery) -> Result<RawVersionSet> {
        let (sql, bind) = self.statement(query)?;
        debug!("{}: {} {:?}", self.label, sql, bind);

        let mut guard = self.conn.borrow_mut();
        let conn = guard
            .as_mut()
            .ok_or_else(|| self.unavailable(query, "connection already closed"))?;

        let rows = self.runtime.block_on(async {
            let mut statement = sqlx::query_scalar::<_, Option<String>>(&sql);
            if let Some(value) = bind {
                statement = statement.bind(value);
            }
            statement.fetch_all(&mut *conn).await
        });

        rows.map(|rows| rows.into_iter().flatten().collect())
            .map_err(|e| self.unavailable(query, e.to_string()))
    }
}

impl Drop for PostgresInstanceSource {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.get_mut().take() {
            match self.runtime.block_on(conn.close()) {
                Ok(()) => debug!("Closed connection to {}", self.label),
                Err(e) => warn!("Failed to close connection to {}: {}", self.label, e),
            }
        }
    }
}

/// `LIKE` pattern matching patch identifiers of one product
fn patch_log_pattern(patch_key: &str) -> String {
    format!("pcr-%_{}%", patch_key)
}

/// Table names are interpolated into SQL, so only plain identifiers pass
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= MAX_IDENTIFIER_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
