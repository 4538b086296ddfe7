use clap::{Parser, Subcommand};
use snafu::{ResultExt, Snafu};
use std::convert::TryFrom;
use std::env;
use std::path::PathBuf;

use common::config::config_from;
use geosearch::adapters::primary::honeybee::handlers::Settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Config Merge Error: {} [{}]", msg, source))]
    ConfigMerge {
        msg: String,
        source: common::config::Error,
    },
    #[snafu(display("Config Extract Error: {} [{}]", msg, source))]
    ConfigExtract {
        msg: String,
        source: config::ConfigError,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "honeybee",
    about = "Map search over georeferenced documents held by Solr",
    version = VERSION,
    author = AUTHORS
)]
pub struct Opts {
    /// Defines the config directory
    #[clap(parse(from_os_str), short = 'c', long = "config-dir")]
    pub config_dir: PathBuf,

    /// Defines the run mode in {testing, dev, prod, ...}
    ///
    /// If no run mode is provided, a default behavior will be used.
    #[clap(short = 'm', long = "run-mode")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[clap(short = 's', long = "setting", multiple_occurrences = true)]
    pub settings: Vec<String>,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute honeybee with the given configuration
    Run,
    /// Prints honeybee's configuration
    Config,
}

// The settings are assembled, in increasing order of priority, from
// * '<config dir>/honeybee/default.toml'
// * '<config dir>/honeybee/<run mode>.toml', the run mode coming from the RUN_MODE
//   environment variable, or else from the command line
// * '<config dir>/honeybee/local.toml', if present
// * environment variables prefixed with HONEYBEE_, eg HONEYBEE_SERVICE__PORT
// * the SOLR_URL environment variable, for solr.url
// * the command line overrides, '-s key=value'
// `Settings` is defined in `geosearch`, so the constructor is carried by a
// local trait (an inherent impl would violate the orphan rule).
pub trait SettingsFromOpts: Sized {
    fn new(opts: &Opts) -> Result<Self, Error>;
}

impl SettingsFromOpts for Settings {
    fn new(opts: &Opts) -> Result<Self, Error> {
        let run_mode = env::var("RUN_MODE").ok().or_else(|| opts.run_mode.clone());

        let mut overrides = Vec::new();
        if let Ok(solr_url) = env::var("SOLR_URL") {
            overrides.push(format!("solr.url={}", solr_url));
        }
        overrides.extend(opts.settings.iter().cloned());

        config_from(
            opts.config_dir.as_path(),
            &["honeybee"],
            run_mode.as_deref(),
            "HONEYBEE",
            overrides,
        )
        .context(ConfigMergeSnafu {
            msg: String::from("cannot build the configuration"),
        })?
        .try_deserialize()
        .context(ConfigExtractSnafu {
            msg: String::from("cannot extract honeybee settings"),
        })
    }
}

impl TryFrom<&Opts> for Settings {
    type Error = Error;

    fn try_from(opts: &Opts) -> Result<Self, Self::Error> {
        Settings::new(opts)
    }
}
