/// Formatter adapters for the pending-releases report
mod json_formatter;
mod table_formatter;

pub use json_formatter::JsonFormatter;
pub use table_formatter::TableFormatter;
