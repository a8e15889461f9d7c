/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the catalog, the instance
/// databases and the console.
pub mod outbound;
