//! Command-line front end for catalog snapshots.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use po_catalog_merge::Catalog;
use po_catalog_merge::config::{
    EngineSettings,
    load_settings,
};
use po_catalog_merge::snapshot::{
    load_catalog,
    save_catalog,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Log levels
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    /// Errors only
    Error,
    /// Skipped or rejected records
    Warn,
    /// Per-record merge outcomes
    Info,
    /// Loading and lifecycle details
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    const fn to_filter_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "po-catalog-merge",
    about = "Compare, check and merge translation catalog snapshots",
    version
)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Command,

    /// Set log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Directory holding `.po-catalog-merge.json` (defaults to the current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Print what changed between two catalogs
    Diff {
        /// Older catalog snapshot
        old: PathBuf,
        /// Newer catalog snapshot
        new: PathBuf,
    },

    /// Print records whose context keys collide once expanded
    CheckDuplicates {
        /// Catalog snapshot
        catalog: PathBuf,
    },

    /// Add records with an unknown identity
    ImportUnknown {
        /// Catalog snapshot to update
        catalog: PathBuf,
        /// Exported unknown entries
        source: PathBuf,
        /// Write the result here instead of over the catalog
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Add unknown records and rename records whose source text changed
    ImportMismatch {
        /// Catalog snapshot to update
        catalog: PathBuf,
        /// Exported mismatched entries
        source: PathBuf,
        /// Write the result here instead of over the catalog
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Synchronize a catalog with its template
    ImportPot {
        /// Catalog snapshot to update
        catalog: PathBuf,
        /// Template snapshot
        pot: PathBuf,
        /// Write the result here instead of over the catalog
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Normalize the header and sort the records
    Format {
        /// Catalog snapshot to format
        catalog: PathBuf,
        /// Write the result here instead of over the catalog
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print record counts
    Stats {
        /// Catalog snapshot
        catalog: PathBuf,
    },
}

/// Installs the fmt subscriber. Logs go to stderr so stdout stays machine-readable.
fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads and validates the settings of `workspace`, or of the current directory.
fn workspace_settings(workspace: Option<PathBuf>) -> Result<EngineSettings> {
    let root = match workspace {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    load_settings(&root)
        .with_context(|| format!("Failed to load configuration from {}", root.display()))
}

/// Loads a catalog with the configured duplicate checking applied.
fn open_catalog(path: &Path, settings: &EngineSettings) -> Result<Catalog> {
    let mut catalog = load_catalog(path)?;
    catalog.set_check_for_duplicates(settings.check_for_duplicates);
    Ok(catalog)
}

/// Loads an exported catalog to import from.
fn open_export(path: &Path, settings: &EngineSettings) -> Result<Catalog> {
    let mut export = load_catalog(path)?;
    if settings.strip_extracted_comments {
        export.delete_extracted_comments();
    }
    Ok(export)
}

/// Writes `catalog` to `output`, or back to `input` when no output is given.
fn store_catalog(input: &Path, output: Option<&Path>, catalog: &Catalog) -> Result<()> {
    let target = output.unwrap_or(input);
    save_catalog(target, catalog)?;
    tracing::info!("Catalog written to {}", target.display());
    Ok(())
}

/// Writes `value` as pretty JSON to stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write report")?;
    writeln!(stdout).context("Failed to write report")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let settings = workspace_settings(cli.workspace)?;

    match cli.command {
        Command::Diff { old, new } => {
            let old = open_catalog(&old, &settings)?;
            let new = open_catalog(&new, &settings)?;
            print_json(&old.diff(&new))?;
        }
        Command::CheckDuplicates { catalog } => {
            let catalog = open_catalog(&catalog, &settings)?;
            let duplicates = catalog.check_duplicates().context("Failed to check duplicates")?;
            print_json(&duplicates)?;
        }
        Command::ImportUnknown { catalog: path, source, output } => {
            let mut catalog = open_catalog(&path, &settings)?;
            let report = catalog.import_unknown(&open_export(&source, &settings)?);
            store_catalog(&path, output.as_deref(), &catalog)?;
            print_json(&report)?;
        }
        Command::ImportMismatch { catalog: path, source, output } => {
            let mut catalog = open_catalog(&path, &settings)?;
            let report = catalog.import_mismatch(&open_export(&source, &settings)?);
            store_catalog(&path, output.as_deref(), &catalog)?;
            print_json(&report)?;
        }
        Command::ImportPot { catalog: path, pot, output } => {
            let mut catalog = open_catalog(&path, &settings)?;
            let report = catalog.import_pot(&load_catalog(&pot)?);
            store_catalog(&path, output.as_deref(), &catalog)?;
            print_json(&report)?;
        }
        Command::Format { catalog: path, output } => {
            let mut catalog = open_catalog(&path, &settings)?;
            catalog.format_with(&settings.metadata_template);
            store_catalog(&path, output.as_deref(), &catalog)?;
        }
        Command::Stats { catalog } => {
            print_json(&open_catalog(&catalog, &settings)?.stats())?;
        }
    }

    Ok(())
}
