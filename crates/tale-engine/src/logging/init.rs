/// Filter used when neither the config nor `RUST_LOG` sets one. wgpu and naga
/// log every resource at info, so they are held to warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives (e.g. `"tale=debug,tale_engine=info"`).
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Installs `env_logger` as the `log` backend.
///
/// Only the first call installs a logger; later calls (or a logger already
/// set by a test harness) leave the existing one in place.
pub fn init_logging(config: LoggingConfig) {
    let env = std::env::var("RUST_LOG").ok();
    let filter = effective_filter(config.env_filter.as_deref(), env.as_deref());

    let installed = env_logger::Builder::new()
        .parse_filters(filter)
        .write_style(config.write_style)
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logging initialized with filter {filter:?}");
    }
}

/// Config filter, else `RUST_LOG`, else [`DEFAULT_FILTER`]. Blank values
/// count as unset.
fn effective_filter<'a>(config: Option<&'a str>, env: Option<&'a str>) -> &'a str {
    [config, env]
        .into_iter()
        .flatten()
        .find(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
}
