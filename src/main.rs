use anyhow::Context;
use tracing::info;

use tempsync::bootstrap::{
    init_tracing_subscriber, load_config_or_default, resolve_config_path, wire_dependencies,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config_or_default(resolve_config_path())?;
    init_tracing_subscriber(&config.log_dir)?;

    let deps = wire_dependencies(&config).context("Failed to wire dependencies")?;
    let state = tempsync::demo::run(deps).await?;

    info!(is_complete = state.is_complete, "demo finished");
    Ok(())
}
