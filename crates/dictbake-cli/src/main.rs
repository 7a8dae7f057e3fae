use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use dictbake_core::{BakeReport, DEFAULT_DICT_PATH};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Dictbake — search-key baking for dictionary data files
///
/// Adds normTerm/normDef (accent-free, lowercase) to every
/// { term, lang, def } entry. With no command, bakes docs/dictionary.js.
#[derive(Parser)]
#[command(name = "dictbake", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Suppress the human-readable report
    #[arg(short, long, global = true)]
    quiet: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake derived search keys into a dictionary file (default)
    Bake(BakeArgs),

    /// Print the search key for each argument
    Norm {
        /// Text to normalize
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List entries with their derived keys, without writing
    Entries {
        /// Path to dictionary file
        #[arg(default_value = DEFAULT_DICT_PATH)]
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct BakeArgs {
    /// Path to dictionary file
    #[arg(default_value = DEFAULT_DICT_PATH)]
    file: PathBuf,
    /// Do not write; exit 1 if the file is not already baked
    #[arg(long, conflicts_with = "stdout")]
    check: bool,
    /// Print the baked file to stdout instead of writing it
    #[arg(long)]
    stdout: bool,
    /// Output the report as JSON
    #[arg(long, conflicts_with = "stdout")]
    json: bool,
}

impl Default for BakeArgs {
    fn default() -> Self {
        BakeArgs {
            file: PathBuf::from(DEFAULT_DICT_PATH),
            check: false,
            stdout: false,
            json: false,
        }
    }
}

// Exit codes: 0 = success, 1 = --check found stale keys, 2 = error
const EXIT_OK: i32 = 0;
const EXIT_STALE: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let quiet = cli.quiet;
    let exit_code = match cli.command.unwrap_or_else(|| Commands::Bake(BakeArgs::default())) {
        Commands::Bake(args) => cmd_bake(args, quiet),
        Commands::Norm { text } => {
            for t in &text {
                println!("{}", dictbake_core::normalize(t));
            }
            EXIT_OK
        }
        Commands::Entries { file, json } => cmd_entries(file, json),
        Commands::Version => {
            println!(
                "dictbake {} (dictbake-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_bake(args: BakeArgs, quiet: bool) -> i32 {
    tracing::debug!(
        file = %args.file.display(),
        check = args.check,
        stdout = args.stdout,
        "bake command"
    );

    if args.stdout {
        return match dictbake_core::baker::read_source(&args.file) {
            Ok(source) => {
                print!("{}", dictbake_core::bake(&source).text);
                EXIT_OK
            }
            Err(e) => report_error(&e),
        };
    }

    let result = if args.check {
        dictbake_core::check(&args.file)
    } else {
        dictbake_core::run(&args.file)
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => return report_error(&e),
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                return EXIT_ERROR;
            }
        }
    } else if !quiet {
        print_report(&report);
    }

    if args.check && report.changed {
        EXIT_STALE
    } else {
        EXIT_OK
    }
}

fn cmd_entries(file: PathBuf, json: bool) -> i32 {
    let source = match dictbake_core::baker::read_source(&file) {
        Ok(source) => source,
        Err(e) => return report_error(&e),
    };
    let entries = dictbake_core::scan_entries(&source);

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                return EXIT_ERROR;
            }
        }
    } else {
        for entry in &entries {
            println!("{}\t{}\t{}", entry.term, entry.lang, entry.norm_term);
        }
    }
    EXIT_OK
}

// ── Output ────────────────────────────────────────────────

fn print_report(report: &BakeReport) {
    let path = report.path.display();
    if report.written {
        println!("Baked {} entries in {}", report.entries, path);
    } else if report.changed {
        eprintln!(
            "{} {} is not baked ({} entries); run `dictbake bake {}`",
            "stale:".yellow().bold(),
            path,
            report.entries,
            path
        );
    } else {
        println!("{} is up to date ({} entries)", path, report.entries);
    }
}

fn report_error(e: &dictbake_core::Error) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), e);
    EXIT_ERROR
}
