/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist: the use case is called directly by
/// the binary, and reaches data sources, the console and output
/// destinations through these traits.
pub mod outbound;
