/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_release_source;

pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
pub use mock_release_source::MockReleaseSource;
