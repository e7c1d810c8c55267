mod cli;

use bom_engine::adapters::outbound::cache::CachingComponentResolver;
use bom_engine::adapters::outbound::console::StderrProgressReporter;
use bom_engine::adapters::outbound::filesystem::{CatalogFileReader, CatalogFileWriter};
use bom_engine::application::dto::AnalysisRequest;
use bom_engine::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use bom_engine::application::use_cases::AnalyzeBomUseCase;
use bom_engine::bom_analysis::domain::{BomId, ScaleOptions, ScaleTarget, YieldOptions};
use bom_engine::config::{self, ConfigFile, Settings, SettingsOverrides};
use bom_engine::ports::inbound::BomAnalysisPort;
use bom_engine::ports::outbound::ProgressReporter;
use bom_engine::shared::error::ExitCode;
use bom_engine::shared::Result;
use cli::{Args, Command};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive
const LOG_ENV: &str = "BOM_ENGINE_LOG";

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let reporter = StderrProgressReporter::new();
    match run(args, &reporter) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            reporter.report_error("\n❌ An error occurred:\n");
            reporter.report_error(&e.to_string());

            // Display error chain
            for cause in e.chain().skip(1) {
                reporter.report_error(&format!("\nCaused by: {}", cause));
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args, reporter: &StderrProgressReporter) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = Settings::resolve(&overrides(&args), config.as_ref());
    tracing::debug!(?settings, "effective settings");

    let mut catalog = CatalogFileReader::open(&args.catalog)?;
    if let Some(date) = args.as_of {
        catalog = catalog.with_reference_date(date);
    }
    reporter.report(&format!(
        "📚 Loaded {} BOM(s) from {}",
        catalog.boms().len(),
        args.catalog.display()
    ));

    let request = build_request(&args.command, &settings)?;
    let writer = request
        .mutates()
        .then(|| CatalogFileWriter::new(args.catalog.clone()));

    let use_case = AnalyzeBomUseCase::new(
        &catalog,
        CachingComponentResolver::new(&catalog),
        writer,
        reporter,
    );

    let response = use_case.analyze(request)?;

    reporter.report(FormatterFactory::progress_message(settings.format));
    let formatted = FormatterFactory::create(settings.format).format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatted)?;

    if response.is_flagged() && settings.fail_on_warning {
        return Ok(ExitCode::AnalysisFlagged);
    }
    Ok(ExitCode::Success)
}

/// `--config` wins; otherwise look for the config file next to the catalog
fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path).map(Some);
    }

    let dir = args
        .catalog
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    config::discover_config(dir)
}

fn overrides(args: &Args) -> SettingsOverrides {
    let mut overrides = SettingsOverrides {
        format: args.format,
        fail_on_warning: args.fail_on_warning,
        ..Default::default()
    };

    match &args.command {
        Command::Explode { max_depth, .. } => overrides.max_depth = *max_depth,
        Command::Scale(scale) => overrides.round_decimals = scale.round_decimals,
        Command::Yield(yield_args) => overrides.variance_threshold_percent = yield_args.threshold,
        Command::Compare { .. } => {}
    }

    overrides
}

fn build_request(command: &Command, settings: &Settings) -> Result<AnalysisRequest> {
    let request = match command {
        Command::Compare { bom_1, bom_2 } => AnalysisRequest::Compare {
            bom_1: BomId::new(bom_1.as_str())?,
            bom_2: BomId::new(bom_2.as_str())?,
        },
        Command::Explode { bom_id, .. } => AnalysisRequest::Explode {
            bom_id: BomId::new(bom_id.as_str())?,
            max_depth: settings.max_depth,
        },
        Command::Scale(scale) => AnalysisRequest::Scale {
            bom_id: BomId::new(scale.bom_id.as_str())?,
            target: ScaleTarget::from_request(scale.batch_size, scale.factor)?,
            options: ScaleOptions {
                round_decimals: settings.round_decimals,
                preview_only: !scale.apply,
            },
        },
        Command::Yield(yield_args) => AnalysisRequest::Yield {
            bom_id: BomId::new(yield_args.bom_id.as_str())?,
            actual_output: yield_args.actual_output,
            options: YieldOptions {
                expected_yield_percent: yield_args.expected_yield,
                variance_threshold_percent: settings.variance_threshold_percent,
                loss_factors: yield_args.losses.clone(),
            },
            planned_quantity: yield_args.planned_quantity,
        },
    };
    Ok(request)
}
