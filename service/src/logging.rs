use crate::config::{Config, RustEnv};
use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Dependency modules that are only logged at Trace level.
const FILTERED_MODULES: &[&str] = &[
    "tower", "tracing", "hyper", "hyper_util", "axum", "reqwest", "rustls",
];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the configured level.
    ///
    /// Below Trace, logs from the HTTP stack are suppressed so request handling and
    /// provider calls stay readable. Production output is never colored.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;
        TermLogger::init(
            level,
            Self::build_log_config(level),
            TerminalMode::Mixed,
            Self::color_choice(config.runtime_env()),
        )
    }

    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        builder.set_target_level(Self::target_level(level));

        for module in Self::ignored_modules(level) {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }

    /// Module paths are printed on every record at Debug and above.
    fn target_level(level: LevelFilter) -> LevelFilter {
        if level >= LevelFilter::Debug {
            LevelFilter::Error
        } else {
            LevelFilter::Off
        }
    }

    fn ignored_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            FILTERED_MODULES
        }
    }

    fn color_choice(env: RustEnv) -> ColorChoice {
        match env {
            RustEnv::Production => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}
