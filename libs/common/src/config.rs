use config::{Config, Environment, File};
use snafu::{ResultExt, Snafu};
use std::path::Path;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Key Value Splitting Error: {}", msg))]
    Splitting { msg: String },

    #[snafu(display("Setting Config Value Error: {}", source))]
    ConfigValue { source: config::ConfigError },

    #[snafu(display("Config Compilation Error: {}", source))]
    ConfigCompilation { source: config::ConfigError },
}

/// Create a new configuration source from a list of assignments key=value
///
/// The function iterates over the list, and for each element, it tries to
/// (a) identify the key and the value, by searching for the '=' sign.
/// (b) parse the value into one of bool, i64, f64. if not it's a string.
pub fn config_from_args(args: impl IntoIterator<Item = String>) -> Result<Config, Error> {
    let mut config = Config::builder();

    for arg in args {
        let (key, val) = arg.split_once('=').ok_or(Error::Splitting {
            msg: format!("missing '=' in setting override: {}", arg),
        })?;

        config = {
            if let Ok(as_bool) = val.parse::<bool>() {
                config.set_override(key, as_bool).context(ConfigValueSnafu)
            } else if let Ok(as_int) = val.parse::<i64>() {
                config.set_override(key, as_int).context(ConfigValueSnafu)
            } else if let Ok(as_float) = val.parse::<f64>() {
                config.set_override(key, as_float).context(ConfigValueSnafu)
            } else {
                config.set_override(key, val).context(ConfigValueSnafu)
            }
        }?
    }

    config.build().context(ConfigCompilationSnafu)
}

/// Layered configuration for the given sub directories of `config_dir`.
///
/// For each sub directory, `default.toml` is read first, then
/// `<run_mode>.toml` when a run mode is given, then an optional
/// `local.toml`. Environment variables with the given prefix come next,
/// and the command line overrides last.
pub fn config_from<'a, R, P>(
    config_dir: &Path,
    sub_dirs: &[&str],
    run_mode: R,
    prefix: P,
    overrides: Vec<String>,
) -> Result<Config, Error>
where
    R: Into<Option<&'a str>> + Clone,
    P: Into<Option<&'a str>>,
{
    let mut builder = sub_dirs
        .iter()
        .fold(Config::builder(), |mut builder, sub_dir| {
            let dir = config_dir.join(sub_dir);

            builder = builder.add_source(File::from(dir.join("default.toml")));

            if let Some(run_mode) = run_mode.clone().into() {
                builder = builder
                    .add_source(File::from(dir.join(run_mode).with_extension("toml")).required(true));
            }

            builder.add_source(File::from(dir.join("local.toml")).required(false))
        });

    if let Some(prefix) = prefix.into() {
        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__"),
        );
    }

    builder
        .add_source(config_from_args(overrides)?)
        .build()
        .context(ConfigCompilationSnafu)
}
