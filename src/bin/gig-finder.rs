use clap::Parser;
use gig_finder::app;
use gig_finder::utils::config_loader::{self, ConfigOverrides};
use gig_finder::utils::constants::DEFAULT_CONFIG_PATH;
use gig_finder::utils::logging;
use anyhow::Result;
use gig_finder::utils::logging::LogLevel;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
    #[arg(long, env = "ENTS24_CLIENT_ID")]
    client_id: Option<String>,
    #[arg(long, env = "ENTS24_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
    /// wait for Enter before exiting
    #[arg(long)]
    pause: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args and env
    // -------------------------------

    let args = Args::parse();
    let overrides = ConfigOverrides {
        client_id: args.client_id.to_owned(),
        client_secret: args.client_secret.to_owned(),
    };

    // -------------------------------
    // 2. Load YAML config
    // -------------------------------

    let bootstrap = logging::bootstrap(args.log_level);
    let service_config = config_loader::run(&args.config, overrides).await?;
    drop(bootstrap);
    logging::run(&service_config, args.log_level.to_owned())?;

    // -------------------------------
    // 3. Fetch token and gigs, print
    // -------------------------------

    info!("gig-finder starting...");
    let mut stdout = std::io::stdout().lock();
    app::run(&service_config, &mut stdout).await?;

    // -------------------------------
    // 4. Optional keypress wait
    // -------------------------------

    if args.pause || service_config.settings.pause_on_exit {
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    }

    Ok(())
}
