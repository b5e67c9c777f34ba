use clap::{Parser, Subcommand, ValueEnum};
use dsx_lib::{MetricKind, Viewport};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsx")]
#[command(
    version,
    about = "Design Style Extractor - Extract visual styles from design references and map them to utility classes",
    long_about = "Design Style Extractor (DSX)\n\nModes:\n- extract: pull colors, fonts, and spacing out of a design image (optionally per region).\n- compare: score an implementation (screenshot or live URL) against the design image.\n- convert: turn an extraction document into utility-CSS classes.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for viewport/threshold/wait/timeouts; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract UI styles from a design image
    Extract {
        #[arg(long, help = "Path to design image (PNG/JPG)")]
        image: PathBuf,

        #[arg(
            long,
            help = "JSON file with region coordinates (from a vision analysis step)"
        )]
        regions: Option<PathBuf>,

        #[arg(
            long,
            default_value = "10",
            help = "Number of dominant colors to extract"
        )]
        palette_size: usize,

        #[arg(
            long,
            short,
            default_value = ".dsx/styles.json",
            help = "Output file path for the extraction document"
        )]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Status output format")]
        format: OutputFormat,
    },

    /// Compare an original design image with the current implementation
    Compare {
        #[arg(long, help = "Path to original design image (PNG/JPG)")]
        original: PathBuf,

        #[arg(
            long,
            conflicts_with = "current_image",
            required_unless_present = "current_image",
            help = "URL to screenshot via Playwright (e.g., http://localhost:3000)"
        )]
        current_url: Option<String>,

        #[arg(long, help = "Path to existing screenshot of current implementation")]
        current_image: Option<PathBuf>,

        #[arg(
            long,
            help = "CSS selector for a specific element (used with --current-url)"
        )]
        selector: Option<String>,

        #[arg(
            long,
            default_value = "1920x1080",
            help = "Viewport dimensions (WIDTHxHEIGHT) for URL capture"
        )]
        viewport: Viewport,

        #[arg(
            long,
            help = "Auto-match the capture viewport to the original image dimensions (--current-url only)"
        )]
        auto_viewport: bool,

        #[arg(
            long,
            default_value = "95.0",
            help = "Similarity threshold (0-100) for passing"
        )]
        threshold: f64,

        #[arg(
            long,
            value_enum,
            default_value = "ssim",
            help = "Similarity metric: ssim (structural), rms (legacy), or both"
        )]
        metric: MetricArg,

        #[arg(
            long,
            default_value = "2000",
            help = "Page settle delay in ms before the screenshot (used with --current-url)"
        )]
        wait: u64,

        #[arg(
            long,
            help = "Analyze difference bands to suggest font size adjustments"
        )]
        font_search: bool,

        #[arg(long, help = "Region JSON file for per-region SSIM analysis")]
        regions: Option<PathBuf>,

        #[arg(
            long,
            default_value = ".dsx",
            help = "Directory for saved images (original/current/diff)"
        )]
        output_dir: PathBuf,

        #[arg(
            long,
            default_value = "30",
            help = "Navigation timeout (seconds) for URL capture"
        )]
        nav_timeout: u64,

        #[arg(
            long,
            default_value = "60",
            help = "Process timeout (seconds) for the Playwright invocation"
        )]
        process_timeout: u64,

        #[arg(long, value_enum, default_value = "json", help = "Report output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Report file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Convert an extraction document to utility-CSS classes
    Convert {
        #[arg(long, help = "Input JSON file produced by the extract command")]
        input: PathBuf,

        #[arg(
            long,
            short,
            default_value = ".dsx/tailwind.json",
            help = "Output file path for the conversion document"
        )]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Status output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Ssim,
    Rms,
    Both,
}

impl From<MetricArg> for MetricKind {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Ssim => MetricKind::Ssim,
            MetricArg::Rms => MetricKind::Rms,
            MetricArg::Both => MetricKind::Both,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
