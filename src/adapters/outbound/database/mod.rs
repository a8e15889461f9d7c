mod postgres_instance;
mod sqlite_catalog;

pub use postgres_instance::PostgresInstanceSource;
pub use sqlite_catalog::SqliteReleaseCatalog;
