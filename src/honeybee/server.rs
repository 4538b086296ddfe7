use honeybee::utils::logger::logger_init;
use snafu::{ResultExt, Snafu};
use std::convert::TryInto;
use std::net::ToSocketAddrs;
use tokio::runtime;
use tracing::{info, instrument};
use warp::Filter;

use super::settings::{Error as SettingsError, Opts};
use geosearch::adapters::primary::honeybee::handlers::{Context, Settings};
use geosearch::adapters::primary::honeybee::routes;
use geosearch::adapters::secondary::solr::SolrSpatialDatabase;
use geosearch::domain::model::error::Error as ModelError;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not set up the Solr spatial database: {}", source))]
    SpatialDatabase { source: ModelError },

    #[snafu(display("Could not generate settings: {}", source))]
    SettingsProcessing { source: SettingsError },

    #[snafu(display("Socket Addr Error with host {} / port {}: {}", host, port, source))]
    SockAddr {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[snafu(display("Addr Resolution Error {}", msg))]
    AddrResolution { msg: String },

    #[snafu(display("Could not build the runtime: {}", source))]
    Runtime { source: std::io::Error },

    #[snafu(display("Could not serialize settings: {}", source))]
    SettingsSerialization { source: serde_json::Error },

    #[snafu(display("Could not init logger: {}", source))]
    InitLog {
        source: honeybee::utils::logger::Error,
    },
}

pub fn run(opts: &Opts) -> Result<(), Error> {
    let settings: Settings = opts.try_into().context(SettingsProcessingSnafu)?;
    let _log_guard = logger_init().context(InitLogSnafu)?;

    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(settings.nb_threads.unwrap_or_else(num_cpus::get))
        .enable_all()
        .build()
        .context(RuntimeSnafu)?;

    runtime.block_on(run_server(settings))
}

pub fn config(opts: &Opts) -> Result<(), Error> {
    let settings: Settings = opts.try_into().context(SettingsProcessingSnafu)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).context(SettingsSerializationSnafu)?
    );
    Ok(())
}

#[instrument(skip(settings))]
pub async fn run_server(settings: Settings) -> Result<(), Error> {
    if let Some(url) = &settings.solr.url {
        info!("Searching Solr at {}", url);
    }

    let database = SolrSpatialDatabase::new(&settings.solr, settings.search.clone())
        .context(SpatialDatabaseSnafu)?;
    let ctx = Context::new(database, settings.clone());

    let api = routes::map_api(ctx).with(warp::trace(|info| {
        tracing::info_span!(
            "request",
            method = %info.method(),
            path = %info.path(),
        )
    }));

    info!("api ready");

    let host = settings.service.host;
    let port = settings.service.port;
    let addr = (host.as_str(), port);
    let addr = addr
        .to_socket_addrs()
        .context(SockAddrSnafu { host: host.clone(), port })?
        .next()
        .ok_or(Error::AddrResolution {
            msg: String::from("Cannot resolve honeybee addr."),
        })?;

    info!("Serving honeybee on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
