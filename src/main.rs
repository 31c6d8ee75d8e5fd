use anyhow::Context;
use clap::Parser;

use walletsync::cli::{self, Cli};
use walletsync::config::{Config, ConfigStore};
use walletsync::logging::init_tracing;
use walletsync::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config_store = ConfigStore::open(path).context("Failed to load configuration")?;
    let mut config = config_store.get();
    if let Some(dir) = cli.state_dir.clone() {
        config.storage.state_dir = Some(dir);
    }

    init_tracing(&config.log);

    let store = Store::open(&config).context("Failed to open state store")?;
    let result = cli::run(&store, cli.command).await;
    store.shutdown();
    result?;
    Ok(())
}
