/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the reconciliation core and reaches
/// infrastructure only through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
