/// Release reconciliation core
///
/// Pure domain types and services: the product catalog, patch identifier
/// decoding, pending-version computation and multi-instance comparison.
/// Nothing here performs I/O.
pub mod domain;
pub mod services;
