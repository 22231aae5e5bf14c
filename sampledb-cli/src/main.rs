//! sampledb CLI - runs the REST API over the sample database
//!
//! Configuration comes from flags, the environment, or a `.env` file in the
//! working directory.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "sampledb",
    author,
    version,
    about = "REST API for the agents/company/customer/student sample database"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; everything has a flag or default
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["sampledb", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.max_connections, 5);
        assert!(args.cors_permissive);
        assert_eq!(args.say_endpoint.path(), "/default/my-function");
    }

    #[test]
    fn serve_overrides() {
        let cli = Cli::try_parse_from([
            "sampledb",
            "--debug",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--max-connections",
            "2",
            "--cors-permissive",
            "false",
            "--say-endpoint",
            "http://localhost:9000/fn",
        ])
        .unwrap();
        assert!(cli.debug);
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.max_connections, 2);
        assert!(!args.cors_permissive);
        assert_eq!(args.say_endpoint.as_str(), "http://localhost:9000/fn");
    }
}
