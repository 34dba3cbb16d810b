//! sysc - CLI

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use sysc::batch::{collect_sources, compile_files};
use sysc::middle::analyzer::Analyzer;
use sysc::middle::optimizer::Optimizer;
use sysc::util::config::{load_config, load_project_config};
use sysc::util::diagnostic::{DiagnosticsStore, JsonEmitter, RecoveryAdvisor};
use sysc::util::logger::{self, LogLevel};
use sysc::{tokenize, CompileConfig, Compiler, NAME, VERSION};
use tracing::debug;

/// Scan, parse, optimize and analyze source files
#[derive(Parser, Debug)]
#[command(name = "sysc")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a source file
    Tokenize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check a source file for syntax errors
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the optimized text of a source file
    Optimize {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print rewrite statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Report code metrics and lint issues
    Analyze {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Run the full pipeline on a source file
    Compile {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the optimized text here
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compile many files or directories in parallel
    Batch {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Maximum number of files compiled at once
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Source file extension to pick up in directories
        #[arg(long, value_name = "EXT")]
        ext: Option<String>,
    },

    /// Print version information
    Version,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load(&args) {
        Ok(config) => config,
        Err(error) => return fail(error),
    };
    logger::init_with_level(LogLevel::from_verbose(config.verbose));

    match run(args, config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => fail(error),
    }
}

fn fail(error: anyhow::Error) -> ExitCode {
    eprintln!("error: {:#}", error);
    ExitCode::from(2)
}

fn load(args: &Args) -> Result<CompileConfig> {
    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => load_project_config(std::env::current_dir()?)
            .context("Failed to load project config")?,
    };
    let verbose = args.verbose || config.verbose;
    Ok(config.verbose(verbose))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))
}

fn status(ok: bool) -> String {
    let label = if ok { "OK" } else { "FAILED" };
    if !std::io::stdout().is_terminal() {
        return label.to_string();
    }
    if ok {
        label.green().to_string()
    } else {
        label.red().to_string()
    }
}

/// `Ok(false)` means the command ran and found errors
fn run(
    args: Args,
    config: CompileConfig,
) -> Result<bool> {
    debug!("Config: {:?}", config);

    match &args.command {
        Commands::Tokenize { file } => {
            let source = read_source(file)?;
            for token in tokenize(&source) {
                println!("{}", token);
            }
            Ok(true)
        }

        Commands::Parse { file } => {
            let source = read_source(file)?;
            let outcome = sysc::parse(&tokenize(&source));
            for message in outcome.messages() {
                println!("{}", message);
            }
            println!("{} {}", status(outcome.is_success()), file.display());
            Ok(outcome.is_success())
        }

        Commands::Optimize { file, stats } => {
            let source = read_source(file)?;
            let mut optimizer = Optimizer::with_config(&config.optimizer);
            let output = optimizer
                .optimize(&source)
                .with_context(|| format!("Failed to optimize: {}", file.display()))?;
            print!("{}", output);
            if *stats {
                eprintln!("{}", optimizer.stats());
            }
            Ok(true)
        }

        Commands::Analyze { file } => {
            let source = read_source(file)?;
            let report = Analyzer::new(config.analyzer.clone()).analyze(&source);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let m = &report.metrics;
                println!(
                    "Lines: {} | Functions: {} | Branches: {} | Complexity: {:.2} | Coverage: {:.2}",
                    m.lines, m.functions, m.branches, m.complexity, m.coverage
                );
                println!("{}", report.render());
            }
            Ok(!report.has_errors())
        }

        Commands::Compile { file, output } => {
            let source = read_source(file)?;
            let store = Arc::new(DiagnosticsStore::new(config.max_errors));
            let compiler = Compiler::with_config(source, config.with_file_name(file.display().to_string()))
                .with_store(store.clone());

            let result = compiler.compile();

            if let Some(path) = output {
                fs::write(path, compiler.output())
                    .with_context(|| format!("Failed to write: {}", path.display()))?;
            }

            print_store(&store, args.json);
            println!("{} {}", status(result.is_ok()), file.display());
            Ok(result.is_ok())
        }

        Commands::Batch { paths, jobs, ext } => {
            let mut config = config;
            if let Some(jobs) = jobs {
                config = config.with_max_parallel(*jobs);
            }
            if let Some(ext) = ext {
                config = config.with_extension(ext.trim_start_matches('.'));
            }

            let files = collect_sources(paths, &config.batch.extension)?;
            let report = compile_files(&files, &config)?;

            for file in &report.files {
                match &file.result {
                    Ok(_) => println!("{} {}", status(file.is_success()), file.path.display()),
                    Err(error) => println!("{} {}: {}", status(false), file.path.display(), error),
                }
            }
            print_store(&report.store, args.json);
            println!(
                "Files: {} | Succeeded: {} | Failed: {}",
                report.files.len(),
                report.succeeded(),
                report.failed()
            );
            Ok(report.failed() == 0)
        }

        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            Ok(true)
        }
    }
}

/// Diagnostics, suggestions, then the health summary
fn print_store(
    store: &DiagnosticsStore,
    json: bool,
) {
    if json {
        println!("{}", JsonEmitter::render_report(&store.all(), &store.report()));
        return;
    }

    if store.all().is_empty() {
        return;
    }

    println!("{}", store.render());

    let advisor = RecoveryAdvisor::new();
    for diagnostic in store.errors() {
        let advice = advisor.advise(&diagnostic);
        let mode = if advice.automatic { " (automatic)" } else { "" };
        println!("Advice {}: {}{}", diagnostic.id, advice.suggestion, mode);
    }

    println!("{}", store.report().summary);
}
