mod cli;

use anyhow::Context;
use cli::Args;
use env_logger::{Builder, Env};
use pending_releases::adapters::outbound::console::{StderrProgressReporter, StdinProductSelector};
use pending_releases::adapters::outbound::database::{PostgresInstanceSource, SqliteReleaseCatalog};
use pending_releases::application::dto::PendingReleasesRequest;
use pending_releases::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use pending_releases::application::use_cases::FindPendingReleasesUseCase;
use pending_releases::config::{load_settings, Settings};
use pending_releases::ports::outbound::{ProductSelector, ProgressReporter};
use pending_releases::reconciliation::domain::ProductSelection;
use pending_releases::shared::error::{ExitCode, ReleaseError};
use pending_releases::shared::Result;
use std::process;

fn main() {
    let args = Args::parse_args();

    Builder::from_env(Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    eprintln!("Pending Releases ver. {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args) {
        if let Some(ReleaseError::InvalidSelection { input }) = e.downcast_ref::<ReleaseError>() {
            log::debug!("Rejected selection {:?}", input);
            eprintln!("\nInvalid selection. Please choose a value from the list.\n");
            process::exit(ExitCode::Success.as_i32());
        }

        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::Failure.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to determine the working directory")?;
    let settings = load_settings(args.config.as_deref(), &working_dir)?;

    let Some(selection) = choose_products(&args, &settings)? else {
        eprintln!("Quitting.\n");
        return Ok(());
    };
    settings.products.select(selection)?;

    let progress_reporter = StderrProgressReporter::new();

    let catalog_source = SqliteReleaseCatalog::open(&settings.catalog_path)?;
    progress_reporter.report(&format!("* Connected to {}", settings.catalog_path.display()));

    // Dropping the vector on an early return closes the connections opened so far
    let mut instances = Vec::with_capacity(settings.instances.len());
    for instance in &settings.instances {
        let source = PostgresInstanceSource::connect(instance, settings.connect_timeout)?;
        progress_reporter.report(&format!("* Connected to {} as {}", instance.name, instance.user));
        instances.push(source);
    }

    let use_case = FindPendingReleasesUseCase::new(
        settings.products,
        catalog_source,
        instances,
        &progress_reporter,
    );
    let response = use_case.execute(PendingReleasesRequest::new(selection, settings.catalog_filter))?;

    progress_reporter.report(FormatterFactory::progress_message(args.format));
    let formatted_output = FormatterFactory::create(args.format).format(&response)?;

    PresenterFactory::create(PresenterType::from_output(args.output)).present(&formatted_output)?;

    Ok(())
}

/// Command-line selection, or the interactive prompt; `None` means quit
fn choose_products(args: &Args, settings: &Settings) -> Result<Option<ProductSelection>> {
    match args.preselection() {
        Some(selection) => Ok(Some(selection)),
        None => StdinProductSelector::new().select(&settings.products),
    }
}
