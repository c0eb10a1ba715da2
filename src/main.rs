use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use figspec::parse::builders::{self, BarChart};
use figspec::{SearchPath, SpecError, Specification, lower, parse, validate};

#[derive(Parser)]
#[command(name = "figspec")]
#[command(about = "Resolve figure specifications for plotting and build systems", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Search location for input_file entries in the spec (repeatable, earliest wins).
    #[arg(long, global = true)]
    include: Vec<PathBuf>,

    /// Print debug messages to stderr.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a Makefile rule making TARGET depend on every input file of SPEC.
    Deps {
        output: PathBuf,
        spec: PathBuf,
        target: String,
    },

    /// Resolve SPEC and write the resolved figure as JSON.
    Resolve {
        spec: PathBuf,

        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Validate SPEC and check that every series resolves.
    Check { spec: PathBuf },

    /// Print SPEC in explicit-subplot form.
    Canonicalize { spec: PathBuf },

    /// Resolve a single-series bar chart over BENCHMARK.
    Bar {
        benchmark: PathBuf,

        #[arg(long)]
        name_regex: Option<String>,

        #[arg(long)]
        x_field: Option<String>,

        #[arg(long)]
        y_field: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let include = absolute_dirs(&cli.global.include)?;

    match cli.cmd {
        Commands::Deps {
            output,
            spec,
            target,
        } => {
            let mut figure = load(&spec)?;
            let dir = spec_dir(&spec)?;
            figure
                .locate_input_files(&search_path(&include, &dir))
                .map_err(report)?;
            info!(path = %output.display(), "saving dependency file");
            figure
                .save_dependency_file(&output, &target)
                .map_err(report)?;
        }
        Commands::Resolve { spec, output } => {
            let mut figure = load(&spec)?;
            let dir = spec_dir(&spec)?;
            figure
                .locate_input_files(&search_path(&include, &dir))
                .map_err(report)?;
            let resolved = lower::lower(&figure, &dir).map_err(report)?;
            let json = serde_json::to_string_pretty(&resolved)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("write resolved figure {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Check { spec } => {
            let mut figure = load(&spec)?;
            let dir = spec_dir(&spec)?;
            figure
                .locate_input_files(&search_path(&include, &dir))
                .map_err(report)?;
            let resolved = lower::lower(&figure, &dir).map_err(report)?;
            let series: usize = resolved.plots.iter().map(|p| p.series.len()).sum();
            println!(
                "{}: ok ({} plots, {} series)",
                spec.display(),
                resolved.plots.len(),
                series
            );
        }
        Commands::Canonicalize { spec } => {
            let raw = parse::parse_file(&spec).map_err(report)?;
            let validated = validate::validate(raw).map_err(report)?;
            let canonical = validated.into_inner().canonicalize();
            print!("{}", serde_yaml::to_string(&canonical)?);
        }
        Commands::Bar {
            benchmark,
            name_regex,
            x_field,
            y_field,
        } => {
            let doc = builders::bar_chart(&BarChart {
                benchmark: benchmark.display().to_string(),
                x_field,
                y_field,
                name_regex,
            });
            let mut figure = Specification::from_document(doc).map_err(report)?;
            let cwd = std::env::current_dir()?;
            let search = if include.is_empty() {
                SearchPath::new([cwd.clone()])
            } else {
                SearchPath::new(include.iter().cloned())
            };
            figure.locate_input_files(&search).map_err(report)?;
            let resolved = lower::lower(&figure, &cwd).map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
    }

    Ok(())
}

fn load(spec: &Path) -> Result<Specification> {
    debug!(spec = %spec.display(), "loading");
    Specification::load(spec).map_err(report)
}

/// Expand structural validation failures to one violation per line.
fn report(e: SpecError) -> anyhow::Error {
    match &e {
        SpecError::StructuralValidation(violations) => {
            let lines: Vec<String> = violations.iter().map(|v| format!("  {}", v)).collect();
            anyhow::anyhow!("[{}] invalid specification:\n{}", e.code(), lines.join("\n"))
        }
        _ => anyhow::anyhow!("[{}] {}", e.code(), e),
    }
}

/// `--include` directories, or the spec's own directory when none are given.
fn search_path(include: &[PathBuf], spec_dir: &Path) -> SearchPath {
    if include.is_empty() {
        SearchPath::new([spec_dir])
    } else {
        SearchPath::new(include.iter().cloned())
    }
}

/// Absolute directory containing `spec`.
fn spec_dir(spec: &Path) -> Result<PathBuf> {
    let dir = match spec.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::canonicalize(dir)
        .with_context(|| format!("directory of specification {}", spec.display()))
}

fn absolute_dirs(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let abs = std::fs::canonicalize(dir)
            .with_context(|| format!("include directory {}", dir.display()))?;
        if !abs.is_dir() {
            bail!("include path {} is not a directory", dir.display());
        }
        out.push(abs);
    }
    Ok(out)
}
