use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use pgdrift::commands;
use pgdrift::config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = "pgdrift.yaml", global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct GenerateArgs {
    #[command(flatten)]
    database_args: config::DatabaseArgs,

    /// Schema namespace to introspect
    #[arg(long)]
    schema: Option<String>,

    /// Entity declarations file
    #[arg(long)]
    declarations: Option<String>,

    /// Directory receiving the generated artifacts
    #[arg(long)]
    output_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff the declared schema against the database and write migration artifacts
    Generate(GenerateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    tokio::select! {
        result = run_main(cli) => result,
        _ = wait_for_shutdown_signal() => {
            info!("Received shutdown signal, exiting...");
            Ok(())
        }
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

async fn run_main(cli: Cli) -> Result<()> {
    let (file_config, root_dir) = config::load_config(&cli.config_file)?;

    match &cli.command {
        Commands::Generate(args) => {
            let cli_overrides = config::CliOverrides {
                database_url: args.database_args.database_url.clone(),
                schema: args.schema.clone(),
                declarations: args.declarations.clone(),
                output_dir: args.output_dir.clone(),
            };

            let config = config::Config::resolve(
                file_config,
                &root_dir,
                cli_overrides,
                config::EnvOverrides::from_env(),
            );

            info!("Generating schema migration artifacts");
            commands::cmd_generate(&config).await
        }
    }
}
