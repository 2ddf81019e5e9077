use std::path::PathBuf;

use clap::Parser;

use crate::daemon;

/// Resmî Gazete PDF processor - fetch PDFs by URL and extract their text in the background
#[derive(Parser, Debug)]
#[command(
    name = "resmi-gazete-processor",
    version,
    about = "Resmî Gazete PDF processor - fetch PDFs by URL and extract their text in the background"
)]
pub struct Cli {
    /// Address to bind (overrides config and RGP_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Path to a JSON configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolve configuration (file, then environment, then flags) and run the
/// service in the foreground.
pub async fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let mut config = daemon::load_config(cli.config.as_deref())?;
    daemon::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    if let Some(ref host) = cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    daemon::start_service(config).await
}
