//! Observability hooks for the codec.
//!
//! The engine reports what it did (partition sizes, substitution counts,
//! escape byte choices) through the `log` facade. The `log_metric!` macro is the
//! structured variant: one machine-greppable line per event, emitted at debug
//! level and skipped entirely when debug logging is off.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::LexisubError;

/// Logs a structured key-value metric line at debug level.
///
/// # Example
/// ```
/// use lexisub::log_metric;
/// let workers = 4;
/// log_metric!("event"="encode", "workers"=&workers);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if ::log::log_enabled!(::log::Level::Debug) {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            ::log::debug!("LEXISUB_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` at Info level, once per process.
///
/// With `log_file` set, records are appended to that file instead of stderr.
/// Later calls are no-ops, even if they name a different file.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), LexisubError> {
    let target = match log_file {
        Some(path) => Some(
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|source| LexisubError::OutputIo {
                    path: path.to_path_buf(),
                    source,
                })?,
        ),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
