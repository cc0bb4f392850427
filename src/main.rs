//! Slash Dispatch - reads command lines from stdin and dispatches them.

use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slash_dispatch::config::Settings;
use slash_dispatch::CommandRegistry;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> ExitCode {
    // Parse command line arguments (simple std::env approach)
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", NAME, VERSION);
        return ExitCode::SUCCESS;
    }

    let settings = match get_config_path(&args) {
        Some(path) => match Settings::load(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting {} v{}", NAME, VERSION);
    info!("Initializer: {:?}", settings.dispatcher.initializer);

    let registry =
        CommandRegistry::with_builtins().with_initializer(settings.dispatcher.initializer.clone());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        };

        // An empty initializer makes every line dispatchable, blank ones included.
        if line.is_empty() && !registry.initializer().is_empty() {
            continue;
        }

        if let Err(e) = registry.execute(&line) {
            eprintln!("error: {}", e);
        }
    }

    ExitCode::SUCCESS
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Reads lines from stdin and dispatches each to a registered command.

USAGE:
    {} [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Path to configuration file (TOML)
    -h, --help             Print help information
    -V, --version          Print version information

COMMANDS:"#,
        NAME, VERSION, NAME
    );

    let registry = CommandRegistry::with_builtins();
    for name in registry.list_commands() {
        if let Some(command) = registry.get(name) {
            println!("    {:<22} {}", name, command.description());
        }
    }
}

/// Get configuration file path from command line arguments.
fn get_config_path(args: &[String]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if (arg == "--config" || arg == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    None
}

/// Initialize logging based on settings.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))?;

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
