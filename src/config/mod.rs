//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{
    CliArgs, Command, CopyTarget, ExportFlags, GlobalOverrides, OpenArgs, RenderArgs, SearchArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "chemsketch";
const ENV_PREFIX: &str = "CHEMSKETCH";
const DEFAULT_PUBCHEM_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
const DEFAULT_CDK_DEPICT_BASE_URL: &str = "https://www.simolecule.com/cdkdepict";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DEPICTION_SIZE: u32 = 500;
const DEFAULT_PAGE_URL: &str = "http://localhost:8080/";
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub pubchem: PubChemSettings,
    pub depiction: DepictionSettings,
    pub session: SessionSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct PubChemSettings {
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepictionProvider {
    /// PubChem's PNG renderer; raster output.
    PubChem,
    /// CDK Depict; SVG output.
    CdkDepict,
}

impl DepictionProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            DepictionProvider::PubChem => "pubchem",
            DepictionProvider::CdkDepict => "cdk-depict",
        }
    }

    fn default_base_url(self) -> &'static str {
        match self {
            DepictionProvider::PubChem => DEFAULT_PUBCHEM_BASE_URL,
            DepictionProvider::CdkDepict => DEFAULT_CDK_DEPICT_BASE_URL,
        }
    }
}

impl FromStr for DepictionProvider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pubchem" => Ok(Self::PubChem),
            "cdk-depict" | "cdk" => Ok(Self::CdkDepict),
            other => Err(format!(
                "unknown provider `{other}` (expected pubchem or cdk-depict)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DepictionSettings {
    pub provider: DepictionProvider,
    pub base_url: Url,
    pub width: NonZeroU32,
    pub height: NonZeroU32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Initial address-bar location; its query selects the first molecule.
    pub page_url: Url,
    pub output_dir: PathBuf,
    /// Clipboard text goes to stdout when unset.
    pub clipboard_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub embed_link: bool,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_global_overrides(&cli.overrides);
    if let Some(Command::Open(args)) = cli.command.as_ref() {
        raw.apply_open_overrides(args);
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    pubchem: RawPubChemSettings,
    depiction: RawDepictionSettings,
    session: RawSessionSettings,
    export: RawExportSettings,
}

impl RawSettings {
    fn apply_global_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(dir) = overrides.output_dir.as_ref() {
            self.session.output_dir = Some(dir.clone());
        }
        if let Some(path) = overrides.clipboard_file.as_ref() {
            self.session.clipboard_file = Some(path.clone());
        }
        if let Some(provider) = overrides.depiction_provider.as_ref() {
            self.depiction.provider = Some(provider.clone());
        }
    }

    fn apply_open_overrides(&mut self, args: &OpenArgs) {
        if let Some(url) = args.url.as_ref() {
            self.session.page_url = Some(url.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            pubchem,
            depiction,
            session,
            export,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let pubchem = build_pubchem_settings(pubchem)?;
        let depiction = build_depiction_settings(depiction)?;
        let session = build_session_settings(session)?;
        let export = build_export_settings(export);

        Ok(Self {
            logging,
            pubchem,
            depiction,
            session,
            export,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_pubchem_settings(pubchem: RawPubChemSettings) -> Result<PubChemSettings, LoadError> {
    let base_url = parse_http_url(
        pubchem.base_url.as_deref().unwrap_or(DEFAULT_PUBCHEM_BASE_URL),
        "pubchem.base_url",
    )?;
    let timeout = timeout_from(pubchem.timeout_seconds, "pubchem.timeout_seconds")?;

    Ok(PubChemSettings { base_url, timeout })
}

fn build_depiction_settings(
    depiction: RawDepictionSettings,
) -> Result<DepictionSettings, LoadError> {
    let provider = match depiction.provider {
        Some(value) => DepictionProvider::from_str(&value)
            .map_err(|reason| LoadError::invalid("depiction.provider", reason))?,
        None => DepictionProvider::PubChem,
    };

    let base_url = parse_http_url(
        depiction
            .base_url
            .as_deref()
            .unwrap_or(provider.default_base_url()),
        "depiction.base_url",
    )?;

    let width = non_zero_u32(
        depiction.width.unwrap_or(DEFAULT_DEPICTION_SIZE),
        "depiction.width",
    )?;
    let height = non_zero_u32(
        depiction.height.unwrap_or(DEFAULT_DEPICTION_SIZE),
        "depiction.height",
    )?;
    let timeout = timeout_from(depiction.timeout_seconds, "depiction.timeout_seconds")?;

    Ok(DepictionSettings {
        provider,
        base_url,
        width,
        height,
        timeout,
    })
}

fn build_session_settings(session: RawSessionSettings) -> Result<SessionSettings, LoadError> {
    let page_url = parse_http_url(
        session.page_url.as_deref().unwrap_or(DEFAULT_PAGE_URL),
        "session.page_url",
    )?;

    let output_dir = session
        .output_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    if output_dir.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "session.output_dir",
            "path must not be empty",
        ));
    }

    let clipboard_file = session
        .clipboard_file
        .filter(|path| !path.as_os_str().is_empty());

    Ok(SessionSettings {
        page_url,
        output_dir,
        clipboard_file,
    })
}

fn build_export_settings(export: RawExportSettings) -> ExportSettings {
    ExportSettings {
        embed_link: export.embed_link.unwrap_or(true),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPubChemSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDepictionSettings {
    provider: Option<String>,
    base_url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSessionSettings {
    page_url: Option<String>,
    output_dir: Option<PathBuf>,
    clipboard_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawExportSettings {
    embed_link: Option<bool>,
}

fn parse_http_url(value: &str, key: &'static str) -> Result<Url, LoadError> {
    let url = Url::parse(value.trim())
        .map_err(|err| LoadError::invalid(key, format!("invalid URL `{value}`: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            key,
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(url)
}

fn timeout_from(seconds: Option<u64>, key: &'static str) -> Result<Duration, LoadError> {
    let seconds = seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if seconds == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    Ok(Duration::from_secs(seconds))
}

fn non_zero_u32(value: u32, key: &'static str) -> Result<NonZeroU32, LoadError> {
    NonZeroU32::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

#[cfg(test)]
mod tests;
