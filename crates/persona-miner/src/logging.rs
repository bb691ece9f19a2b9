use tracing_subscriber::EnvFilter;

/// Installs the process-wide subscriber. `PERSONA_MINER_LOG` overrides the
/// level; `--verbose` raises the default from info to debug.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("PERSONA_MINER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
