use bom_engine::application::dto::OutputFormat;
use bom_engine::bom_analysis::domain::{LossFactor, LossKind};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Analyze Bills of Materials: compare versions, explode, scale and calculate yield
#[derive(Parser, Debug)]
#[command(name = "bom-engine")]
#[command(version)]
#[command(about = "Analyze Bills of Materials stored in a catalog file", long_about = None)]
pub struct Args {
    /// BOM catalog file (.yml, .yaml, .json or .toml)
    #[arg(short, long, global = true, default_value = "boms.yml")]
    pub catalog: PathBuf,

    /// Config file (defaults to bom-engine.config.yml next to the catalog)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format: json or yaml
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Resolve sub-assemblies effective on this date (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Exit with status 1 when the analysis raises warnings
    #[arg(long, global = true)]
    pub fail_on_warning: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two versions of the same product's BOM
    Compare {
        /// Older BOM id
        bom_1: String,
        /// Newer BOM id
        bom_2: String,
    },
    /// Explode a BOM into all levels of sub-assemblies and purchased materials
    Explode {
        bom_id: String,
        /// Number of levels to return
        #[arg(long)]
        max_depth: Option<u8>,
    },
    /// Scale a BOM to a new batch size or by a factor
    Scale(ScaleArgs),
    /// Calculate theoretical yield and variance against an expected yield
    Yield(YieldArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ScaleArgs {
    pub bom_id: String,

    /// New output quantity
    #[arg(long, conflicts_with = "factor")]
    pub batch_size: Option<f64>,

    /// Multiplier applied to every quantity
    #[arg(long)]
    pub factor: Option<f64>,

    /// Decimals kept after scaling (0-6)
    #[arg(long)]
    pub round_decimals: Option<u8>,

    /// Write the scaled quantities back to the catalog
    #[arg(long)]
    pub apply: bool,
}

#[derive(ClapArgs, Debug)]
pub struct YieldArgs {
    pub bom_id: String,

    /// Quantity actually produced
    #[arg(long)]
    pub actual_output: f64,

    /// Expected yield in percent (0-100)
    #[arg(long)]
    pub expected_yield: Option<f64>,

    /// Allowed deviation between theoretical and expected yield, in percent points
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Loss contribution as KIND=QUANTITY (moisture, trim, process or a custom name)
    /// Can be specified multiple times: --loss moisture=12 --loss trim=3.5
    #[arg(long = "loss", value_name = "KIND=QTY", value_parser = parse_loss)]
    pub losses: Vec<LossFactor>,

    /// Planned run size to project output and waste for
    #[arg(long)]
    pub planned_quantity: Option<f64>,
}

fn parse_loss(value: &str) -> Result<LossFactor, String> {
    let (kind, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("Invalid loss '{}'. Expected KIND=QUANTITY", value))?;
    let kind = LossKind::from_str(kind)?;
    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("Invalid loss quantity '{}'", quantity))?;
    Ok(LossFactor::new(kind, quantity))
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
