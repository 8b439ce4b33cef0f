use tracing_subscriber::EnvFilter;

use crate::config::{Config, ProfilingMode};

/// Install the global `tracing` subscriber using [`Config::from_env`].
pub fn init() {
    init_with(&Config::from_env());
}

/// Install the global `tracing` subscriber and start profiling as configured.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_with(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|err| {
        eprintln!(
            "invalid log filter {:?} ({err}), falling back to \"info\"",
            config.log_filter
        );
        EnvFilter::new("info")
    });

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    match config.profiling {
        ProfilingMode::Off => {}
        ProfilingMode::On => crate::profiling::enable_scopes(),
        ProfilingMode::WithWebserver => {
            #[cfg(feature = "profiling")]
            crate::profiling::init_profiling(crate::profiling::ProfilingBackend::PuffinHttp);
            #[cfg(not(feature = "profiling"))]
            {
                tracing::warn!("profiling webserver requested but the `profiling` feature is off");
                crate::profiling::enable_scopes();
            }
        }
    }
}
