use std::io;

use tracing_subscriber::EnvFilter;

use crate::error::{PlateError, Result};

/// Install the global stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` (e.g. `"info"`,
/// `"plate_o_rs=debug"`) is used as the filter.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| PlateError::InvalidConfig(format!("log level '{}': {}", level, e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| PlateError::InvalidConfig(format!("logger already initialized: {}", e)))
}
