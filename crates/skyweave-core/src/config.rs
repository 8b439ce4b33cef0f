/// Environment variable consulted by [`Config::from_env`] for the log filter.
pub const LOG_ENV_VAR: &str = "SKYWEAVE_LOG";

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info,skyweave_layers=debug,skyweave_render=debug";

/// Runtime configuration for a Skyweave process.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    /// Build a config from the process environment.
    ///
    /// `SKYWEAVE_LOG` overrides the log filter when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(filter) = std::env::var(LOG_ENV_VAR) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }
        config
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    #[default]
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to `puffin_viewer` over HTTP
    WithWebserver,
}
