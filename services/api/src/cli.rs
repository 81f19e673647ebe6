use crate::infra::{parse_date, parse_validation, ValidationArg};
use crate::report::{run_estimate, run_jurisdictions, run_rates};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use patent_fees::error::AppError;
use patent_fees::estimates::{ApplicantType, ApplicationType, PriorArtSearch};

#[derive(Parser, Debug)]
#[command(
    name = "Patent Fee Estimator",
    about = "Compare patent filing costs across offices from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a cost estimate for one scenario
    Estimate(EstimateArgs),
    /// List supported jurisdictions and their currencies
    Jurisdictions,
    /// Show the exchange rates estimates are computed with
    Rates(RatesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve fallback rates only; skip startup and periodic refreshes
    #[arg(long)]
    pub(crate) offline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ApplicantArg {
    Startup,
    Individual,
    Sme,
    Company,
}

impl From<ApplicantArg> for ApplicantType {
    fn from(value: ApplicantArg) -> Self {
        match value {
            ApplicantArg::Startup => ApplicantType::Startup,
            ApplicantArg::Individual => ApplicantType::Individual,
            ApplicantArg::Sme => ApplicantType::Sme,
            ApplicantArg::Company => ApplicantType::Company,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ApplicationArg {
    Provisional,
    Complete,
    Foreign,
    Pct,
}

impl From<ApplicationArg> for ApplicationType {
    fn from(value: ApplicationArg) -> Self {
        match value {
            ApplicationArg::Provisional => ApplicationType::Provisional,
            ApplicationArg::Complete => ApplicationType::Complete,
            ApplicationArg::Foreign => ApplicationType::Foreign,
            ApplicationArg::Pct => ApplicationType::Pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum SearchArg {
    #[default]
    None,
    Quick,
    Extensive,
}

impl From<SearchArg> for PriorArtSearch {
    fn from(value: SearchArg) -> Self {
        match value {
            SearchArg::None => PriorArtSearch::None,
            SearchArg::Quick => PriorArtSearch::Quick,
            SearchArg::Extensive => PriorArtSearch::Extensive,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// `all` or a single jurisdiction code (IN, EP, US, UK, KR, JP, CN, PCT, AU)
    #[arg(long, default_value = "all")]
    pub(crate) scope: String,
    #[arg(long, value_enum)]
    pub(crate) applicant: ApplicantArg,
    #[arg(long = "type", value_enum)]
    pub(crate) application: ApplicationArg,
    #[arg(long, value_enum, default_value_t = SearchArg::None)]
    pub(crate) search: SearchArg,
    #[arg(long, default_value_t = 10.0)]
    pub(crate) claims: f64,
    #[arg(long, default_value_t = 30.0)]
    pub(crate) pages: f64,
    /// PCT e-filing reduction in CHF
    #[arg(long, default_value_t = 0.0)]
    pub(crate) pct_efiling_reduction: f64,
    /// Extra PCT fees in CHF (ISA search, transmittal)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) pct_add_on: f64,
    /// EP validation estimate in EUR as COUNTRY=AMOUNT, e.g. de=400 (repeatable)
    #[arg(long = "validate", value_parser = parse_validation)]
    pub(crate) validations: Vec<ValidationArg>,
    /// Schedule date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Refresh exchange rates from the configured provider first
    #[arg(long)]
    pub(crate) live: bool,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RatesArgs {
    /// Fetch current rates from the configured provider
    #[arg(long)]
    pub(crate) live: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args).await,
        Command::Jurisdictions => run_jurisdictions(),
        Command::Rates(args) => run_rates(args).await,
    }
}
