//! jsonstore CLI.
//!
//! Re-serializes JSON through a chosen object store, which makes the store's
//! member ordering visible from the shell.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jsonstore::{
    DumpOptions, ErrorCode, Indexed, InsertionOrdered, JsonValue, Limits, ObjectStore,
    ObjectTraits, Sorted,
};

#[derive(Parser)]
#[command(name = "jsonstore")]
#[command(about = "JSON re-serialization over pluggable object stores", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse JSON and print it back through the chosen store
    Format {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print with this many spaces per level
        #[arg(long, value_name = "N")]
        indent: Option<usize>,

        /// Escape non-ASCII characters as \uXXXX
        #[arg(long)]
        ascii: bool,
    },

    /// Print the top-level object keys in store order
    Keys {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct InputArgs {
    /// Object store backing parsed objects
    #[arg(long, value_enum, default_value_t = StoreKind::Sorted)]
    store: StoreKind,

    /// Use strict limits (ASCII only, duplicate keys rejected)
    #[arg(long, conflicts_with = "limits")]
    strict: bool,

    /// Load limits from a TOML file
    #[arg(long, value_name = "FILE")]
    limits: Option<PathBuf>,

    /// Input file; stdin when omitted
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// BTreeMap, keys sorted
    Sorted,
    /// Linked map, input order
    Insertion,
    /// IndexMap, input order
    Indexed,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Json(#[from] ErrorCode),
    #[error("{path}: {source}")]
    Read { path: String, source: io::Error },
}

impl CliError {
    fn name(&self) -> &'static str {
        match self {
            CliError::Json(code) => code.name(),
            CliError::Read { .. } => "read",
        }
    }
}

enum Action {
    Format(DumpOptions),
    Keys,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Format {
            input,
            indent,
            ascii,
        }) => {
            let options = DumpOptions {
                indent,
                ensure_ascii: ascii,
            };
            dispatch(&input, Action::Format(options))
        }
        Some(Commands::Keys { input }) => dispatch(&input, Action::Keys),
        Some(Commands::Version) => {
            println!("jsonstore v{}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        None => {
            println!("jsonstore v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}: {}", e.name(), e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(input: &InputArgs, action: Action) -> Result<String, CliError> {
    match input.store {
        StoreKind::Sorted => run::<Sorted>(input, action),
        StoreKind::Insertion => run::<InsertionOrdered>(input, action),
        StoreKind::Indexed => run::<Indexed>(input, action),
    }
}

fn run<B: ObjectTraits>(input: &InputArgs, action: Action) -> Result<String, CliError> {
    let limits = load_limits(input)?;
    let bytes = read_input(input)?;
    debug!(store = B::NAME, bytes = bytes.len(), "parsing input");

    let value = JsonValue::<B>::parse_with_limits(&bytes, limits)?;

    match action {
        Action::Format(options) => {
            let mut output = jsonstore::dump_with(&value, &options);
            output.push('\n');
            Ok(output)
        }
        Action::Keys => {
            let map = value
                .as_object()
                .ok_or_else(|| ErrorCode::E120_NotAnObject(value.type_name().to_string()))?;
            let mut output = String::new();
            for key in map.keys() {
                output.push_str(key);
                output.push('\n');
            }
            Ok(output)
        }
    }
}

fn load_limits(input: &InputArgs) -> Result<Limits, CliError> {
    match &input.limits {
        Some(path) => Ok(Limits::load(path)?),
        None if input.strict => Ok(Limits::strict()),
        None => Ok(Limits::lenient()),
    }
}

fn read_input(input: &InputArgs) -> Result<Vec<u8>, CliError> {
    match &input.file {
        Some(path) => std::fs::read(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(bytes)
        }
    }
}
