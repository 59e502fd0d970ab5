use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one.
///
/// wgpu logs adapter and pipeline chatter at info; the overlay only wants its own.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// How the studio (or any host binary) wants overlay logs written.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter, e.g. `"goodgrid_engine::api=trace"` for per-frame stats.
    pub filter: Option<String>,
    /// Hide timestamps; handy when diffing logs of two rendered frames.
    pub no_timestamps: bool,
}

static INIT: Once = Once::new();

/// Installs `env_logger` for the process, once.
///
/// The filter comes from `config.filter`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
/// Later calls, or a logger installed by someone else, leave logging unchanged.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_owned());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        if config.no_timestamps {
            builder.format_timestamp(None);
        }

        if builder.try_init().is_ok() {
            log::debug!("overlay logging on ({filter})");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        init_logging(LoggingConfig {
            filter: Some("goodgrid_engine=trace".into()),
            no_timestamps: true,
        });
        init_logging(LoggingConfig::default());
        assert!(INIT.is_completed());
    }
}
