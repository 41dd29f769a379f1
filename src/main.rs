//! tasks CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tasksync::cli::commands::{self, todo::TodoOp};
use tasksync::cli::{Cli, Commands};
use tasksync::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.quiet {
        tasksync::QUIET.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // JSON when asked for, or when stdout is not a terminal
    let json = cli.json || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn,tasksync=error"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,hyper=info,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let config = cli.config.as_ref();
    let connection = &cli.connection;

    match &cli.command {
        Commands::List { filter } => {
            commands::todo::execute(TodoOp::List(*filter), config, connection, json)
        }
        Commands::Add { title } => {
            commands::todo::execute(TodoOp::Add(title.clone()), config, connection, json)
        }
        Commands::Delete { id } => {
            commands::todo::execute(TodoOp::Delete(*id), config, connection, json)
        }
        Commands::ClearCompleted => {
            commands::todo::execute(TodoOp::ClearCompleted, config, connection, json)
        }
        Commands::Config { command } => commands::config::execute(command, config, connection, json),
        Commands::Completions { shell } => commands::completions::execute(*shell),
        Commands::Version => commands::version::execute(json),
    }
}
