/// Data Transfer Objects for application layer
///
/// DTOs carry data between the use case and the adapters, keeping the
/// reconciliation core free of presentation concerns.
mod output_format;
mod pending_releases_request;
mod pending_releases_response;

pub use output_format::OutputFormat;
pub use pending_releases_request::PendingReleasesRequest;
pub use pending_releases_response::PendingReleasesResponse;
