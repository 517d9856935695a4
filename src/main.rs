use clap::Parser;
use color_eyre::Result;
use opensky_pusher::{
    init_errors,
    init_logging,
    App,
    Args,
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    // Before parsing so `.env` entries can back the env-bound arguments.
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(args.verbose)?;
    if let Ok(path) = dotenv {
        tracing::debug!(?path, "loaded environment file");
    }

    let config = Config::new(&args)?;
    App::new(&config, args.once)?.run().await
}
