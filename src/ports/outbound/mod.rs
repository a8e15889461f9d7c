/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach databases, the console and output destinations.
pub mod formatter;
pub mod output_presenter;
pub mod product_selector;
pub mod progress_reporter;
pub mod release_source;

pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use product_selector::ProductSelector;
pub use progress_reporter::ProgressReporter;
pub use release_source::ReleaseSource;
