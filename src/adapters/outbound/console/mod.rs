/// Console adapters: progress on stderr and the interactive product prompt
mod progress_reporter;
mod selection_prompt;

pub use progress_reporter::StderrProgressReporter;
pub use selection_prompt::StdinProductSelector;
