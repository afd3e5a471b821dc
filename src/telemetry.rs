use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "wardrobe_api=info,tower_http=info";

/// Installs the global subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
