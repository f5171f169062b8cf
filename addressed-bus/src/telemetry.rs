use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;

/// Installs a formatting subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already set, so it is safe to call
/// from every test.
pub fn init_tracing() {
    init_tracing_with(false);
}

/// Like [`init_tracing`], but the fallback level follows [`Config::verbose`].
pub fn init_tracing_for(config: &Config) {
    init_tracing_with(config.verbose);
}

/// `RUST_LOG` still wins when set; otherwise `verbose` selects `debug`.
pub fn init_tracing_with(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
