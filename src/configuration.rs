use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use url::Url;

const DEFAULT_TARGET: &str = "http://localhost:3000/api";
const DEFAULT_REQUEST_TIMEOUT: u64 = 30000;
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

lazy_static! {
    static ref CONFIGURATION: Result<Configuration, anyhow::Error> =
        Configuration::try_from(PartialConfiguration::get()?);
}

/// Smoke tester for the school administration REST API.
#[derive(Parser)]
#[command(about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// The list of supported subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the version and exit
    Version,
    /// Log in, upload the branding settings and verify the result
    Run {
        /// The path to a configuration file. If present, the configuration file is used
        /// to configure the tool. Arguments given on the command line take precedence
        /// over the configuration file.
        #[arg(long, value_parser, value_name = "CONFIG_FILE.YAML")]
        config: Option<PathBuf>,
        /// The base URL of the API server to test, e.g. http://localhost:3000/api.
        #[arg(value_parser = verify_url, long)]
        target: Option<Url>,
        /// How to log in to the API server. The value should be the name of a YAML
        /// file with `email` and `password` keys. The built-in test account is used
        /// if this option is absent.
        #[arg(long, value_parser, value_name = "AUTH.YAML")]
        authentication: Option<PathBuf>,
        /// Custom (static) headers that should be added to each request, given as
        /// a YAML file containing a map of header names to values.
        #[arg(long, value_parser, value_name = "STATIC_HEADERS.YAML")]
        header: Option<PathBuf>,
        /// Per-request time-out in milliseconds. Defaults to DEFAULT_REQUEST_TIMEOUT milliseconds.
        #[arg(value_parser, long)]
        request_timeout: Option<u64>,
        /// Output to stdout can be formatted in human readable format or json.
        #[arg(value_parser, long, value_enum, required = false, ignore_case = true)]
        output_format: Option<OutputFormat>,
        // Manually added possible values below, since automatically showing possible values of an external (remote) enum
        // such as log::LevelFilter is not well supported.
        // See https://github.com/serde-rs/serde/issues/1301, https://github.com/serde-rs/serde/issues/723
        /// Log level to output. This flag takes precedence over the environment variable. [possible values: off, error, warn, debug, info, trace]
        #[arg(value_parser = clap::value_parser!(log::LevelFilter), long, value_enum, env = "LOG_LEVEL", ignore_case = true)]
        log_level: Option<log::LevelFilter>,
    },
}

impl Commands {
    fn config_filename(&self) -> Option<&PathBuf> {
        match self {
            Commands::Run { config, .. } => config.as_ref(),
            _ => None,
        }
    }

    fn run_config(self) -> Result<PartialConfiguration, anyhow::Error> {
        match self {
            Commands::Run {
                target,
                authentication,
                header,
                request_timeout,
                output_format,
                log_level,
                ..
            } => Ok(PartialConfiguration {
                target,
                authentication,
                header,
                request_timeout,
                output_format,
                log_level,
            }),
            _ => Err(anyhow!(
                "Tried to generate a configuration for an unsupported command"
            )),
        }
    }
}

/// PartialConfiguration is a representation of a settings-smoke configuration,
/// obtained from the CLI or from a configuration file.
///
/// Partial configurations are only one source, e.g. config file or command line.
/// You can't make any field mandatory, since then they all need to be specified in both places,
/// which is counterproductive. The Configuration is combined from the two Partials
/// and does have mandatory fields, with defaults filled in where nothing was given.
#[derive(Debug, Default, PartialEq, Eq, Deserialize, Parser)]
struct PartialConfiguration {
    /// The base URL of the API server to test.
    #[arg(value_parser = verify_url, long)]
    pub target: Option<Url>,

    /// How to log in to the API server. The value should be the name of a YAML
    /// file with `email` and `password` keys.
    #[clap(value_parser, long)]
    pub authentication: Option<PathBuf>,

    /// Custom (static) headers that should be added to each request.
    #[clap(value_parser, long)]
    pub header: Option<PathBuf>,

    /// Per-request time-out in milliseconds. Defaults to DEFAULT_REQUEST_TIMEOUT milliseconds.
    #[clap(value_parser, long)]
    pub request_timeout: Option<u64>,

    /// Output to stdout can be formatted in human readable format or json.
    #[clap(value_parser, long, value_enum, ignore_case = true)]
    pub output_format: Option<OutputFormat>,

    /// Log level to output. This flag takes precedence over the environment variable. [possible values: off, error, warn, debug, info, trace]
    #[clap(value_parser = clap::value_parser!(log::LevelFilter), long, value_enum, env = "LOG_LEVEL", ignore_case = true)]
    pub log_level: Option<log::LevelFilter>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum OutputFormat {
    #[serde(alias = "json")]
    Json,
    #[serde(
        alias = "human-readable",
        alias = "human_readable",
        alias = "humanreadable"
    )]
    HumanReadable,
}

/// The main configuration object.
#[derive(Debug, PartialEq, Eq)]
pub struct Configuration {
    /// The base URL of the API server to test.
    pub target: Url,

    /// How to log in to the API server. The value should be the name of a YAML
    /// file with `email` and `password` keys. The built-in test account is used
    /// if this is `None`.
    pub authentication: Option<PathBuf>,

    /// Custom (static) headers that should be added to each request.
    pub header: Option<PathBuf>,

    /// Per-request time-out in milliseconds.
    pub request_timeout: u64,

    /// Output to stdout can be formatted in human readable format or json.
    pub output_format: OutputFormat,

    /// Log level to output. This flag takes precedence over the environment variable.
    pub log_level: log::LevelFilter,
}

impl Configuration {
    /// Attempts to gather configuration from all sources. If certain required
    /// parameters are invalid, the `Err` variant specifies what is wrong.
    pub fn get() -> Result<&'static Self, &'static anyhow::Error> {
        CONFIGURATION.as_ref()
    }

    /// Like `get`, but panics if the configuration is incomplete.
    pub fn must_get() -> &'static Self {
        Self::get().expect("Error loading configuration")
    }
}

impl TryFrom<PartialConfiguration> for Configuration {
    type Error = anyhow::Error;

    fn try_from(value: PartialConfiguration) -> Result<Self, Self::Error> {
        Ok(Self {
            target: match value.target {
                Some(url) => url,
                None => verify_url(DEFAULT_TARGET)?,
            },
            authentication: value.authentication,
            header: value.header,
            request_timeout: value.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            output_format: value.output_format.unwrap_or(OutputFormat::HumanReadable),
            log_level: value.log_level.unwrap_or(DEFAULT_LOG_LEVEL),
        })
    }
}

impl PartialConfiguration {
    /// Dynamically loads configuration from the command line arguments
    /// and from any file given as `--config <NAME>`.
    /// The values from the cli are preferred if given.
    pub fn get() -> Result<Self, anyhow::Error> {
        // Parse command line arguments
        let cli_config = Cli::parse();
        // Load any configuration file
        let mut file_config = match cli_config.command.config_filename() {
            Some(filename) => PartialConfiguration::from_yaml_file(filename)?,
            None => return cli_config.command.run_config(),
        };

        // Prefer cli values if present
        file_config.overwrite_from(cli_config.command.run_config()?);
        Ok(file_config)
    }

    /// Loads a Configuration from a yaml file
    fn from_yaml_file(filename: &Path) -> Result<Self, anyhow::Error> {
        let file = std::fs::File::open(filename)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    /// Overwrites `self` with the options given in other. If `other` contains
    /// None for a certain field, leaves the value from `self` in place.
    fn overwrite_from(&mut self, other: PartialConfiguration) {
        *self = PartialConfiguration {
            target: other.target.or(self.target.take()),
            authentication: other.authentication.or(self.authentication.take()),
            header: other.header.or(self.header.take()),
            request_timeout: other.request_timeout.or(self.request_timeout.take()),
            output_format: other.output_format.or(self.output_format.take()),
            log_level: other.log_level.or_else(|| self.log_level.take()),
        };
    }
}

fn verify_url(arg: &str) -> anyhow::Result<Url> {
    let url = url::Url::parse(arg)?;
    if !url.scheme().starts_with("http") {
        bail!("The given URL does not start with a scheme (http(s)://)")
    }
    if url.host().is_none() {
        bail!("The given URL does not seem to contain a hostname")
    }
    Ok(url)
}
