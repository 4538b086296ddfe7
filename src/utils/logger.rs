use snafu::{ResultExt, Snafu};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info,geosearch=debug,honeybee=debug";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not redirect log records: {}", details))]
    LogTracer { details: String },

    #[snafu(display("Could not install tracing subscriber: {}", source))]
    Subscriber {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

/// Installs a bunyan formatted subscriber writing to stdout.
///
/// Traces are filtered with the RUST_LOG env var, or, if it's not set, with
/// `info,geosearch=debug,honeybee=debug`. The returned guard flushes the
/// writer when dropped, so keep it around as long as the process runs.
pub fn logger_init() -> Result<tracing_appender::non_blocking::WorkerGuard, Error> {
    LogTracer::init().map_err(|err| Error::LogTracer {
        details: err.to_string(),
    })?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_owned());

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking);
    let subscriber = Registry::default()
        .with(EnvFilter::new(&filter))
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    tracing::subscriber::set_global_default(subscriber).context(SubscriberSnafu)?;

    Ok(guard)
}
