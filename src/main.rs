use clap::Parser;

use resmi_gazete_processor::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = cli::dispatch(&cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
