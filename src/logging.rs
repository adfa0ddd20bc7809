use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{ProvisionError, ProvisionResult};

/// Install the diagnostics subscriber on stderr.
///
/// `RUST_LOG` wins when set. Otherwise `info`, with this
/// crate's debug output on top when `verbose`. Operator-facing
/// progress is printed directly and is not affected.
pub fn init_tracing(verbose: bool) -> ProvisionResult<()> {
    let fallback = fallback_filter(verbose);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| ProvisionError::Other(format!("invalid log filter: {e}")))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter_layer)
        .try_init()
        .map_err(|e| ProvisionError::Other(format!("failed to install logger: {e}")))
}

const fn fallback_filter(verbose: bool) -> &'static str {
    if verbose { "info,addsite=debug" } else { "info" }
}
