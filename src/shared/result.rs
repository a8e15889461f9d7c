/// Result alias used across the crate; every error funnels into anyhow so
/// the CLI can print the whole cause chain.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
