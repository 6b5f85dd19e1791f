use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jab_palette::{
    binarize, generate_embedded, ColorMode, DistanceMetric, DitherPolicy, QualityReport,
    Quantizer, Rgb,
};
use jabcolor::models::{AppConfig, DumpFormat, PaletteDump, CONFIG_ENV};
use jabcolor::rendering::{encode_indexed_png, encode_rgb_png, read_png};

#[derive(Parser)]
#[command(name = "jabcolor")]
#[command(about = "JAB Code palette tool - generate palettes, classify colors, quantize images")]
struct Cli {
    /// YAML config file (falls back to $JABCOLOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical palette for a color mode
    Palette {
        /// Number of colors (4, 8, 16, 32, 64, 128 or 256)
        #[arg(short, long)]
        colors: Option<ColorMode>,

        /// Print the 64-color subset embedded in symbol metadata
        #[arg(long)]
        embedded: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },
    /// Classify a color to its nearest palette index
    Classify {
        /// Color as hex, e.g. "#F01E1E" or "f00"
        color: String,

        /// Number of colors (4, 8, 16, 32, 64, 128 or 256)
        #[arg(short, long)]
        colors: Option<ColorMode>,

        /// Distance metric
        #[arg(short, long, value_enum)]
        metric: Option<MetricArg>,
    },
    /// Reduce a PNG image to a JAB Code palette
    Quantize {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Number of colors (4, 8, 16, 32, 64, 128 or 256)
        #[arg(short, long)]
        colors: Option<ColorMode>,

        /// Error diffusion policy
        #[arg(short, long, value_enum)]
        dither: Option<DitherArg>,

        /// Distance metric
        #[arg(short, long, value_enum)]
        metric: Option<MetricArg>,

        /// Write an indexed PNG (PLTE in palette order) instead of RGB
        #[arg(long)]
        indices: bool,
    },
    /// Reduce a PNG image to black and white by luma threshold
    Binarize {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,
    },
    /// Check every canonical palette against the quality criteria
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Yaml,
}

impl From<FormatArg> for DumpFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => DumpFormat::Text,
            FormatArg::Json => DumpFormat::Json,
            FormatArg::Yaml => DumpFormat::Yaml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    /// Plain RGB Euclidean distance
    Euclidean,
    /// Rec. 601 luma-weighted distance
    Luma,
}

impl From<MetricArg> for DistanceMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Euclidean => DistanceMetric::Euclidean,
            MetricArg::Luma => DistanceMetric::LumaWeighted,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DitherArg {
    /// Dither palettes with more than 8 colors
    Auto,
    Never,
    Always,
}

impl From<DitherArg> for DitherPolicy {
    fn from(arg: DitherArg) -> Self {
        match arg {
            DitherArg::Auto => DitherPolicy::Auto,
            DitherArg::Never => DitherPolicy::Never,
            DitherArg::Always => DitherPolicy::Always,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jabcolor=warn,jab_palette=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Some(Commands::Palette {
            colors,
            embedded,
            format,
        }) => run_palette_command(&config, colors, embedded, format.into()),
        Some(Commands::Classify {
            color,
            colors,
            metric,
        }) => run_classify_command(&config, &color, colors, metric.map(Into::into)),
        Some(Commands::Quantize {
            input,
            output,
            colors,
            dither,
            metric,
            indices,
        }) => run_quantize_command(
            &config,
            &input,
            &output,
            colors,
            dither.map(Into::into),
            metric.map(Into::into),
            indices,
        ),
        Some(Commands::Binarize { input, output }) => run_binarize_command(&input, &output),
        Some(Commands::Validate) => run_validate_command(&config),
        None => {
            run_status_command(&config, cli.config.as_deref());
            Ok(())
        }
    }
}

fn run_palette_command(
    config: &AppConfig,
    colors: Option<ColorMode>,
    embedded: bool,
    format: DumpFormat,
) -> anyhow::Result<()> {
    let mode = colors.unwrap_or(config.colors);
    let palette = if embedded {
        if !mode.requires_interpolation() {
            anyhow::bail!("{mode}-color mode has no embedded subset; use 128 or 256");
        }
        generate_embedded(mode)
    } else {
        config.palette_for(mode)
    };

    let dump = PaletteDump::new(mode, &palette, embedded);
    print!("{}", dump.render(format)?);
    Ok(())
}

fn run_classify_command(
    config: &AppConfig,
    color: &str,
    colors: Option<ColorMode>,
    metric: Option<DistanceMetric>,
) -> anyhow::Result<()> {
    let mode = colors.unwrap_or(config.colors);
    let metric = metric.unwrap_or(config.metric);
    let sample: Rgb = color
        .parse()
        .with_context(|| format!("Invalid color '{color}'"))?;

    let palette = config.palette_for(mode);
    let (index, distance) = palette.find_nearest(sample, metric);
    let nearest = palette
        .get(index)
        .context("Classifier returned an index outside the palette")?;

    println!("{sample} -> index {index} ({nearest}), distance {distance:.2}");
    Ok(())
}

fn run_quantize_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    colors: Option<ColorMode>,
    dither: Option<DitherPolicy>,
    metric: Option<DistanceMetric>,
    indices: bool,
) -> anyhow::Result<()> {
    let mode = colors.unwrap_or(config.colors);
    let image = read_png(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let raster = image.raster()?;

    let quantizer = Quantizer::with_palette(config.palette_for(mode))
        .dither(dither.unwrap_or(config.dither))
        .metric(metric.unwrap_or(config.metric));
    tracing::info!(
        colors = %mode,
        width = image.width,
        height = image.height,
        dithering = quantizer.uses_dithering(),
        "Quantizing"
    );

    let reduced = quantizer.quantize(&raster);
    let png_bytes = if indices {
        encode_indexed_png(&reduced)?
    } else {
        encode_rgb_png(&reduced)?
    };

    std::fs::write(output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Quantized {} to {mode} colors ({} bytes)",
        output.display(),
        png_bytes.len()
    );
    Ok(())
}

fn run_binarize_command(input: &Path, output: &Path) -> anyhow::Result<()> {
    let image = read_png(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let reduced = binarize(&image.raster()?);
    let png_bytes = encode_indexed_png(&reduced)?;

    std::fs::write(output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Binarized {} ({} bytes)", output.display(), png_bytes.len());
    Ok(())
}

fn run_validate_command(config: &AppConfig) -> anyhow::Result<()> {
    let mut failed = Vec::new();
    for mode in ColorMode::ALL {
        let report = QualityReport::for_palette(&config.palette_for(mode));
        let status = if report.passes() { "ok" } else { "FAIL" };
        println!(
            "{:>4} colors  min separation {:>7.2}  variation {:>7.2}  {status}",
            report.colors, report.min_separation, report.variation
        );
        if !report.passes() {
            failed.push(mode);
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("{} palette(s) failed validation", failed.len());
    }
    Ok(())
}

/// Show configuration and supported modes when no command is given
fn run_status_command(config: &AppConfig, config_arg: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV).ok();

    println!("jabcolor v{VERSION} - JAB Code palette tool\n");

    println!("Configuration:");
    let source = match (config_arg, config_env.as_deref()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(env)) => format!("{env} (from {CONFIG_ENV})"),
        (None, None) => "(defaults)".to_string(),
    };
    println!("  Source:        {source}");
    println!("  Colors:        {}", config.colors);
    println!("  Metric:        {:?}", config.metric);
    println!("  Dither:        {:?}", config.dither);
    println!("  4-color set:   {:?}", config.four_color_profile);

    println!("\nColor Modes:");
    for mode in ColorMode::ALL {
        println!("  Nc={}  {}", mode.nc(), mode.description());
    }

    println!("\nRun 'jabcolor --help' for available commands.");
}
