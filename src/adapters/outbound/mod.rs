/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod database;
pub mod filesystem;
pub mod formatters;
