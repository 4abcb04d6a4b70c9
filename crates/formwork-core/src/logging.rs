use tracing_subscriber::EnvFilter;

use crate::config::FormConfig;

/// Install the global fmt subscriber with the default filter.
pub fn init() {
    init_with(&FormConfig::default());
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `config.log_filter` when set. Calling this twice is
/// harmless: the second install attempt is ignored.
pub fn init_with(config: &FormConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
