use ferrous_doh_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        providers = config.providers.len(),
        timeout_ms = config.query.timeout_ms,
        state_dir = %config.storage.state_dir,
        "Configuration loaded"
    );

    Ok(config)
}
