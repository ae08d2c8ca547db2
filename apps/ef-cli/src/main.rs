use clap::{Parser, Subcommand};
use ef_core::{EfError, format_eng, parse_eng};
use ef_project::{ProjectError, SearchReport, find_search, load, run_project, run_search};
use ef_series::{Approximation, DecadeRange, ESeries, StandardValues};
use ef_solver::{MAX_COMBINATIONS, SearchRequest, SolverError, Tolerance, Topology, search};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Core(#[from] EfError),
}

#[derive(Parser)]
#[command(name = "ef-cli")]
#[command(about = "efind - combinations of E-series standard values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the standard values of a series
    Series {
        /// Series name (E3, E6, E12, E24, E48, E96)
        series: ESeries,
        /// Lowest power-of-ten exponent
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        min_exp: i32,
        /// Highest power-of-ten exponent
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        max_exp: i32,
        /// Unit symbol appended to every value
        #[arg(long, default_value = "")]
        unit: String,
    },
    /// Show the standard values around a value
    Approx {
        /// Value, e.g. 4700, 4.7k or 4k7
        value: String,
        #[arg(long, default_value = "E24")]
        series: ESeries,
        #[arg(long, default_value = "Ω")]
        unit: String,
    },
    /// Search combinations of standard values for a target
    Search {
        /// Target value, e.g. 1000, 1k or 33.3
        target: String,
        #[arg(long, default_value = "E24")]
        series: ESeries,
        /// Values per combination
        #[arg(long, default_value_t = 2)]
        arity: usize,
        /// series, parallel or divider
        #[arg(long, default_value = "series")]
        topology: Topology,
        /// Relative tolerance (0.01 = 1%)
        #[arg(long, default_value_t = 0.01, conflicts_with = "abs")]
        rel: f64,
        /// Absolute tolerance, in the unit of the target
        #[arg(long)]
        abs: Option<f64>,
        /// Also try combinations with fewer values
        #[arg(long)]
        allow_fewer: bool,
        /// Show at most this many results
        #[arg(long, default_value = "10")]
        limit: NonZeroUsize,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        min_exp: i32,
        #[arg(long, default_value_t = 6, allow_hyphen_values = true)]
        max_exp: i32,
        #[arg(long, default_value = "Ω")]
        unit: String,
    },
    /// Run the searches in a project file
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Only run the search with this ID
        #[arg(long)]
        id: Option<String>,
    },
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Series {
            series,
            min_exp,
            max_exp,
            unit,
        } => cmd_series(series, min_exp, max_exp, &unit),
        Commands::Approx {
            value,
            series,
            unit,
        } => cmd_approx(&value, series, &unit),
        Commands::Search {
            target,
            series,
            arity,
            topology,
            rel,
            abs,
            allow_fewer,
            limit,
            min_exp,
            max_exp,
            unit,
        } => {
            let tolerance = match abs {
                Some(a) => Tolerance::Absolute(a),
                None => Tolerance::Relative(rel),
            };
            let options = SearchOptions {
                series,
                decades: DecadeRange::new(min_exp, max_exp)?,
                arity,
                topology,
                tolerance,
                allow_fewer,
                limit,
            };
            cmd_search(&target, &options, &unit)
        }
        Commands::Run { project_path, id } => cmd_run(&project_path, id.as_deref()),
        Commands::Validate { project_path } => cmd_validate(&project_path),
    }
}

struct SearchOptions {
    series: ESeries,
    decades: DecadeRange,
    arity: usize,
    topology: Topology,
    tolerance: Tolerance,
    allow_fewer: bool,
    limit: NonZeroUsize,
}

fn cmd_series(series: ESeries, min_exp: i32, max_exp: i32, unit: &str) -> CliResult<()> {
    let values = StandardValues::new(series, DecadeRange::new(min_exp, max_exp)?);
    println!("{} ({} values, ±{}%):", series, values.len(), series.tolerance_percent());
    for value in &values {
        println!("  {}", value.format(unit)?);
    }
    Ok(())
}

fn cmd_approx(value: &str, series: ESeries, unit: &str) -> CliResult<()> {
    let exact = parse_eng(value)?;
    let floor = Approximation::new(exact, series)?;
    let digits = series.significant_digits();

    println!("Target: {}", floor.format_exact(unit)?);
    print_approximation("below", &floor, unit)?;
    if let Some(above) = floor.above() {
        print_approximation("above", &above, unit)?;
    }
    let best = floor.best();
    println!(
        "  best  {} in {}",
        format_eng(best.approx(), unit, digits + 1)?,
        series
    );
    Ok(())
}

fn print_approximation(label: &str, approx: &Approximation, unit: &str) -> CliResult<()> {
    println!(
        "  {label} {} ({:+.2}%)",
        approx.format(unit)?,
        approx.error() * 100.0
    );
    Ok(())
}

fn build_request(target: f64, options: &SearchOptions) -> CliResult<SearchRequest> {
    let values = StandardValues::new(options.series, options.decades);
    let request = SearchRequest::new(target, options.tolerance, options.arity, &values)
        .symmetric(options.topology.is_symmetric())
        .allow_fewer(options.allow_fewer)
        .limit(Some(options.limit.get()));
    request.check_budget(MAX_COMBINATIONS)?;
    Ok(request)
}

fn cmd_search(target: &str, options: &SearchOptions, unit: &str) -> CliResult<()> {
    let target = parse_eng(target)?;
    let request = build_request(target, options)?;

    let topology = options.topology;
    let candidates = search(&request, |v| topology.evaluate(v))?;
    debug!(found = candidates.len(), "search command done");

    let report = SearchReport {
        id: "search".to_string(),
        unit: unit.to_string(),
        series: options.series,
        topology,
        target,
        tolerance: options.tolerance,
        combinations: request.combinations(),
        candidates,
    };
    print_report(&report)
}

fn cmd_run(project_path: &Path, id: Option<&str>) -> CliResult<()> {
    println!("Running project: {}", project_path.display());
    let project = load(project_path)?;

    let reports = match id {
        Some(id) => vec![run_search(find_search(&project, id)?)?],
        None => run_project(&project)?,
    };
    for report in &reports {
        print_report(report)?;
    }
    println!("✓ {} search(es) completed", reports.len());
    Ok(())
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load(project_path)?;
    println!("✓ Project is valid ({} searches)", project.searches.len());
    Ok(())
}

fn print_report(report: &SearchReport) -> CliResult<()> {
    let digits = report.series.significant_digits();
    // a divider yields a bare ratio whatever the part unit
    let result_unit = match report.topology {
        Topology::Divider => "",
        _ => report.unit.as_str(),
    };
    let separator = match report.topology {
        Topology::Series => " + ",
        Topology::Parallel => " || ",
        Topology::Divider => " : ",
    };

    println!();
    println!(
        "{}: {} of {} values, target {} {}",
        report.id,
        report.topology,
        report.series,
        format_eng(report.target, result_unit, 4)?,
        report.tolerance
    );
    println!("  {} combinations evaluated", report.combinations);

    if report.candidates.is_empty() {
        println!("  No combination found within tolerance");
        return Ok(());
    }

    for candidate in &report.candidates {
        println!(
            "  {:<32} = {:<12} error {:.3e}",
            candidate.format_values(&report.unit, digits, separator)?,
            format_eng(candidate.achieved, result_unit, 4)?,
            candidate.error
        );
    }
    Ok(())
}
