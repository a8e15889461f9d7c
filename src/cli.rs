use clap::{ArgAction, Parser};
use pending_releases::application::dto::OutputFormat;
use pending_releases::reconciliation::domain::ProductSelection;
use std::path::PathBuf;

/// Report catalog releases not yet applied to one or more database instances
#[derive(Parser, Debug)]
#[command(name = "pending-releases")]
#[command(version)]
#[command(about = "Report catalog releases not yet applied to one or more database instances", long_about = None)]
pub struct Args {
    /// Config file (defaults to pending-releases.config.yml in the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Check every product without prompting
    #[arg(short, long, conflicts_with = "product")]
    pub all: bool,

    /// Check a single product by its 0-based index without prompting
    #[arg(short, long, value_name = "INDEX")]
    pub product: Option<usize>,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Selection given on the command line, if any
    pub fn preselection(&self) -> Option<ProductSelection> {
        if self.all {
            Some(ProductSelection::All)
        } else {
            self.product.map(ProductSelection::Single)
        }
    }

    /// Default log filter for the verbosity flag; `RUST_LOG` takes precedence
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
