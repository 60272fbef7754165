//! Docport CLI - Javadoc preservation for regenerated sources.
//!
//! Usage:
//!   docport export <sources>                  # Capture a doc set snapshot
//!   docport migrate <new-sources> -o <out>    # Replay a doc set onto new sources
//!   docport signatures <path>                 # Inspect computed signatures

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use docport::config::{
    Config, DEFAULT_EXPORT_FILE, DEFAULT_EXPORT_LABEL, DEFAULT_NEW_MARKER, DEFAULT_REPORT_FILE,
};
use docport::{
    extract_dir, save, write_report, DocPortError, DocSet, DocSource, Injector, MigrationReport,
};

#[derive(Parser)]
#[command(name = "docport")]
#[command(about = "Preserve hand-written Javadoc across regenerated sources", long_about = None)]
struct Cli {
    /// Project root (where docport.toml lives)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract Javadocs from a source tree into a doc set file
    Export {
        /// Source directory to scan
        sources: PathBuf,

        /// Output file (default: javadocs-export.json)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Label recorded as the doc set's origin
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Replay a doc set onto freshly generated sources
    Migrate {
        /// Newly generated source tree
        new_sources: PathBuf,

        /// Where the annotated tree is written
        #[arg(short, long)]
        out: PathBuf,

        /// Doc set file to replay
        #[arg(long)]
        docs: Option<PathBuf>,

        /// Doc set URL to replay
        #[arg(long)]
        docs_url: Option<String>,

        /// Old source tree to extract from instead of a stored doc set
        #[arg(long)]
        old_sources: Option<PathBuf>,

        /// Where to write the migration report (default: migration-report.json)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Skip writing a report
        #[arg(long)]
        no_report: bool,

        /// Marker comment for new, undocumented declarations.
        /// An empty string disables marking.
        #[arg(long)]
        new_marker: Option<String>,
    },

    /// Print computed signatures for a file or directory
    Signatures {
        /// A .java file or a directory of them
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.root)?;

    match cli.command {
        Commands::Export {
            sources,
            out,
            label,
        } => {
            let out = out.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            let label = label
                .or(config.label)
                .unwrap_or_else(|| DEFAULT_EXPORT_LABEL.to_string());

            println!("Extracting Javadocs from {}...", sources.display());
            let extraction = extract_dir(&sources)?;
            for warning in &extraction.warnings {
                println!("  skipped {}: {}", warning.file.display(), warning.message);
            }
            println!("Found {} documented elements.", extraction.entries.len());

            let doc_set = DocSet::new(&label, extraction.entries);
            save(&doc_set, &out)?;
            println!("✓ Export complete: {}", out.display());
        }

        Commands::Migrate {
            new_sources,
            out,
            docs,
            docs_url,
            old_sources,
            report,
            no_report,
            new_marker,
        } => {
            let source = doc_source(
                docs.or(config.docs_file),
                docs_url.or(config.docs_url),
                old_sources.or(config.old_sources),
            )?;
            let marker = new_marker
                .or(config.new_marker)
                .unwrap_or_else(|| DEFAULT_NEW_MARKER.to_string());

            let injector = Injector::from_source(&source, &marker)?;
            let outcome = injector.run(&new_sources, &out)?;

            for warning in &outcome.warnings {
                println!(
                    "  copied through {}: {}",
                    warning.file.display(),
                    warning.message
                );
            }

            println!("✓ Migration complete");
            println!("  Preserved: {}", outcome.stats.preserved);
            println!("  New items: {}", outcome.stats.new_items);
            println!("  Orphaned:  {}", outcome.stats.orphaned);
            println!("  Output:    {}", out.display());

            if !no_report {
                let report_path = report
                    .or(config.report_file)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));
                let report = MigrationReport::new(outcome.stats.clone(), outcome.orphaned);
                write_report(&report, &report_path)?;
                println!("  Report:    {}", report_path.display());
            }
        }

        Commands::Signatures { path } => {
            print_signatures(&path)?;
        }
    }

    Ok(())
}

/// Precedence mirrors the original tooling: stored file, then URL, then live
/// extraction from the old tree.
fn doc_source(
    docs: Option<PathBuf>,
    docs_url: Option<String>,
    old_sources: Option<PathBuf>,
) -> Result<DocSource> {
    if let Some(path) = docs {
        Ok(DocSource::File(path))
    } else if let Some(url) = docs_url {
        Ok(DocSource::Url(url))
    } else if let Some(dir) = old_sources {
        Ok(DocSource::Sources(dir))
    } else {
        Err(DocPortError::NoDocSource.into())
    }
}

fn print_signatures(path: &Path) -> Result<()> {
    let files = if path.is_dir() {
        docport::extract::java_files(path)
    } else {
        vec![path.to_path_buf()]
    };

    for file in files {
        let source = std::fs::read_to_string(&file)?;
        println!("{}:", file.display());
        match docport::parser::parse_declarations(&file, &source) {
            Ok(declarations) => {
                for decl in declarations {
                    println!("  {}  {}", &decl.signature.hash[..12], decl.signature.raw);
                }
            }
            Err(e) => println!("  (skipped: {})", e),
        }
    }
    Ok(())
}
