use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the chemsketch binary.
#[derive(Debug, Parser)]
#[command(
    name = "chemsketch",
    version,
    about = "Render SMILES strings as 2-D molecule diagrams and export them"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "CHEMSKETCH_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load the page URL and render what its query string describes.
    Open(OpenArgs),
    /// Render a SMILES string.
    Render(RenderArgs),
    /// Look a compound up by name on PubChem and render it.
    Search(SearchArgs),
    /// Interactive session; one input line per user action.
    Shell,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Directory that receives PNG and SVG downloads.
    #[arg(long = "output-dir", value_name = "PATH", value_hint = ValueHint::DirPath, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Write copied text to this file instead of stdout.
    #[arg(long = "clipboard-file", value_name = "PATH", value_hint = ValueHint::FilePath, global = true)]
    pub clipboard_file: Option<PathBuf>,

    /// Depiction service (pubchem|cdk-depict).
    #[arg(long = "depiction-provider", value_name = "PROVIDER", global = true)]
    pub depiction_provider: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ExportFlags {
    /// Download the drawing as PNG.
    #[arg(long)]
    pub png: bool,

    /// Download the drawing as an SVG document.
    #[arg(long)]
    pub svg: bool,

    /// Copy to the clipboard; may be repeated.
    #[arg(long = "copy", value_enum, value_name = "WHAT")]
    pub copy: Vec<CopyTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyTarget {
    /// SVG document text.
    Svg,
    /// `<img>` snippet with the SVG inlined.
    Embed,
    /// Shareable page URL.
    Url,
}

#[derive(Debug, Args, Default, Clone)]
pub struct OpenArgs {
    /// Page URL to open; its `smiles` and `name` parameters select the molecule.
    #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
    pub url: Option<String>,

    #[command(flatten)]
    pub exports: ExportFlags,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// SMILES string to draw.
    #[arg(value_name = "SMILES", allow_hyphen_values = true)]
    pub smiles: String,

    /// Display name shown instead of the SMILES.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub exports: ExportFlags,
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Compound name, e.g. "aspirin".
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub exports: ExportFlags,
}
