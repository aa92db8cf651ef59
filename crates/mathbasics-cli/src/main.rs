use clap::{Parser, Subcommand, ValueEnum};
use mathbasics::{BuiltinSource, LibrarySource, ManifestSource, Operation};
use mathbasics_cli::{Event, Message, Shell, ShellConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mathbasics")]
#[command(about = "Load the mathbasics library and run its operations", long_about = None)]
struct Cli {
    /// Shell configuration file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Resource root override, repeatable
    #[arg(long = "resource-root", value_name = "NAME=PATH", global = true)]
    resource_roots: Vec<String>,

    /// Where library descriptors are read from
    #[arg(long, value_enum, default_value_t = SourceKind::Builtin, global = true)]
    source: SourceKind,

    /// Print messages as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    Builtin,
    Manifest,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference add/multiply/subtract/divide checks
    TestMath,
    /// Apply one operation to two operands
    Calc {
        /// add, subtract, multiply or divide
        #[arg(value_parser = parse_operation)]
        operation: Operation,
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },
    /// Say hello
    Hello,
    /// Print the loaded library descriptor
    Describe,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse()
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn show(message: &Message, json: bool) -> anyhow::Result<()> {
    let rendered = if json {
        serde_json::to_string_pretty(message)?
    } else {
        message.to_string()
    };
    if message.is_error() {
        eprintln!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    for spec in &cli.resource_roots {
        config.apply_override(spec).map_err(anyhow::Error::msg)?;
    }

    let source: Box<dyn LibrarySource> = match cli.source {
        SourceKind::Builtin => Box::new(BuiltinSource::new()),
        SourceKind::Manifest => Box::new(match &config.manifest_dir {
            Some(dir) => ManifestSource::with_fallback_dir(dir),
            None => ManifestSource::new(),
        }),
    };

    let shell = match Shell::start(&config, source.as_ref()) {
        Ok(shell) => shell,
        Err(err) => {
            show(&Message::error(&err), cli.json)?;
            std::process::exit(2);
        }
    };

    let event = match cli.command {
        Commands::TestMath => Event::TestMath,
        Commands::Calc {
            operation,
            lhs,
            rhs,
        } => Event::Calc {
            operation,
            lhs,
            rhs,
        },
        Commands::Hello => Event::Hello,
        Commands::Describe => Event::Describe,
    };

    let message = shell.dispatch(&event);
    show(&message, cli.json)?;
    if message.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
