use clap::{Parser, Subcommand};
use query_lite::cli::{self as prog_cli, OutputMode};
use query_lite::config::SchemaConfig;
use query_lite::errors::QueryError;
use query_lite::logger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "querylite", version, about = "Turn URL query strings into typed database queries", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "Path to a config file (TOML). If omitted, the usual locations are searched.")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: error|warn|info|debug|trace. Overrides QUERYLITE_LOG_LEVEL.")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Validate and parse a query string, printing the query document as JSON")]
    Parse {
        #[arg(help = "Query string, e.g. 'limit=10&sort=-age&name=^jo'")]
        query: String,
        #[arg(long, help = "Indent the JSON output")]
        pretty: bool,
        #[arg(long, conflicts_with = "pretty", help = "Print one line per bucket instead of JSON")]
        plain: bool,
    },
    #[command(about = "Validate a query string, printing 'ok' or the first error message")]
    Validate {
        #[arg(help = "Query string to validate")]
        query: String,
    },
    #[command(subcommand, about = "Inspect the effective configuration")]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    #[command(about = "Print the effective configuration as TOML")]
    Show,
    #[command(about = "Write the effective configuration to a TOML file")]
    Write {
        #[arg(help = "Destination path")]
        path: PathBuf,
    },
}

fn init_logging(level: Option<&str>) {
    let res = match level {
        Some(lvl) => logger::configure_logging(Some(lvl), None, None),
        None if std::env::var_os("QUERYLITE_LOG_LEVEL").is_some() || std::env::var_os("QUERYLITE_LOG_FILE").is_some() => {
            logger::configure_from_env()
        }
        None => logger::configure_logging(Some("warn"), None, None),
    };
    if let Err(e) = res {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());
    let cfg = match SchemaConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let (cmd, mode) = match cli.command {
        Commands::Parse { query, pretty, plain } => {
            let mode = if plain {
                OutputMode::Plain
            } else if pretty {
                OutputMode::Pretty
            } else {
                OutputMode::Json
            };
            (prog_cli::Command::Parse { query }, mode)
        }
        Commands::Validate { query } => (prog_cli::Command::Validate { query }, OutputMode::Json),
        Commands::Config(ConfigCommands::Show) => (prog_cli::Command::ConfigShow, OutputMode::Json),
        Commands::Config(ConfigCommands::Write { path }) => (prog_cli::Command::ConfigWrite { path }, OutputMode::Json),
    };
    match prog_cli::run(cmd, &cfg, mode) {
        Ok(out) => println!("{out}"),
        Err(QueryError::Validation(e)) => {
            match serde_json::to_string(&e) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("error: {e}"),
            }
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(prog_cli::exit_code(&e));
        }
    }
}
