/// Use cases module containing application business logic orchestration
mod find_pending_releases;

pub use find_pending_releases::FindPendingReleasesUseCase;
