use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{error, info, warn};

use magnetophoto::app::{PhotoController, PhotoNotice};
use magnetophoto::color::{Color, ColorMapper};
use magnetophoto::config::Settings;
use magnetophoto::image_pipeline::{
    FileCapture, OutputFormat, PipelineConfig, TintMode, TintPipeline,
};
use magnetophoto::logger;
use magnetophoto::sensors::{DeliveryRate, ReplaySource, SensorSnapshot};

#[derive(Parser)]
#[command(name = "magnetophoto")]
#[command(about = "Tint photos with a color read from motion and magnetic sensors")]
struct Cli {
    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the color a recorded sensor session maps to
    Color {
        /// JSON-lines sensor session
        #[arg(long)]
        events: PathBuf,
    },
    /// Tint a photo with the color from a recorded sensor session
    Tint {
        /// Photo standing in for the camera capture
        input: PathBuf,
        /// Where to save the tinted photo (default: <input>_tinted.<ext>)
        output: Option<PathBuf>,
        /// JSON-lines sensor session
        #[arg(long, conflicts_with = "color")]
        events: Option<PathBuf>,
        /// Use this color (#rrggbb) instead of sensor readings
        #[arg(long)]
        color: Option<Color>,
        #[arg(long, value_enum)]
        mode: Option<TintMode>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// JPEG quality (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,
        /// Overlay opacity for bake mode (0-1)
        #[arg(long)]
        alpha: Option<f32>,
        /// Saturation for saturation mode when no magnetometer reading is available
        #[arg(long)]
        saturation: Option<f32>,
    },
    /// Write the current settings to the config file
    Config {
        /// Only print the settings and the file location
        #[arg(long)]
        print: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    });

    let settings = Settings::load();

    match cli.command {
        Commands::Color { events } => print_color(&settings, &events),
        Commands::Config { print } => write_config(&settings, print),
        Commands::Tint {
            input,
            output,
            events,
            color,
            mode,
            format,
            quality,
            alpha,
            saturation,
        } => {
            let mut settings = settings;
            if let Some(mode) = mode {
                settings.tint.mode = mode;
            }
            match (format, output.as_deref().and_then(OutputFormat::from_path)) {
                (Some(format), Some(named)) if format != named => {
                    warn!(
                        "Writing {:?} into a .{} file name as requested",
                        format,
                        named.extension()
                    );
                    settings.tint.format = format;
                }
                (Some(format), _) => settings.tint.format = format,
                (None, Some(named)) => settings.tint.format = named,
                (None, None) => {}
            }
            if let Some(quality) = quality {
                settings.tint.jpeg_quality = quality;
            }
            if let Some(alpha) = alpha {
                settings.tint.overlay_alpha = alpha;
            }
            let output = output.unwrap_or_else(|| default_output(&input, settings.tint.format));

            let mut config = settings.pipeline_config();
            if let Some(saturation) = saturation {
                config.saturation = saturation;
            }

            match color {
                Some(color) => tint_with_color(config, &input, &output, color),
                None => {
                    tint_with_sensors(&settings, config, &input, &output, events.as_deref()).await
                }
            }
        }
    }
}

fn print_color(settings: &Settings, events: &Path) -> anyhow::Result<()> {
    let mapper = settings.mapper()?;
    let session = ReplaySource::from_file(events)?;

    let mut snapshot = SensorSnapshot::new();
    for event in session.events() {
        match snapshot.apply(event) {
            Ok(next) => snapshot = next,
            Err(e) => warn!("Skipping event: {}", e),
        }
    }

    let required = mapper.required_channels();
    match mapper.map(&snapshot) {
        Some(color) => println!("{}", color),
        None => {
            let missing: Vec<String> = snapshot
                .missing(&required)
                .iter()
                .map(|c| c.to_string())
                .collect();
            println!("{} (default, missing: {})", settings.color.default_color, missing.join(", "));
        }
    }
    if let Some(saturation) = ColorMapper::saturation(&snapshot) {
        println!("saturation: {:.3}", saturation);
    }
    Ok(())
}

fn tint_with_color(
    config: PipelineConfig,
    input: &Path,
    output: &Path,
    color: Color,
) -> anyhow::Result<()> {
    let pipeline = TintPipeline::new(config);
    let timings = pipeline
        .process_file(input, output, color)
        .with_context(|| format!("tinting {}", input.display()))?;
    timings.log_summary();
    info!("Saved {}", output.display());
    Ok(())
}

async fn tint_with_sensors(
    settings: &Settings,
    config: PipelineConfig,
    input: &Path,
    output: &Path,
    events: Option<&Path>,
) -> anyhow::Result<()> {
    let mut session = match events {
        Some(path) => ReplaySource::from_file(path)?,
        None => {
            warn!("No sensor session given, using the default color");
            ReplaySource::new(Vec::new())
        }
    };

    let mut controller = PhotoController::new(
        FileCapture::new(input),
        settings.mapper()?,
        config,
    )
    .with_default_color(settings.color.default_color);
    controller.start();

    controller.resume(&mut session, DeliveryRate::Normal);
    session.play();
    let color = controller.sync_sensors().await?;
    if controller.hub().is_ready() {
        info!("All sensors reported, color {}", color);
    } else {
        warn!("Not every sensor reported, using the default color {}", color);
    }
    controller.pause(&mut session);

    let staging = tempfile::tempdir().context("creating capture directory")?;
    let capture_path = staging.path().join(
        input
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("capture")),
    );
    controller.take_photo(&capture_path, output.to_path_buf())?;

    match controller.next_notice().await {
        Some(PhotoNotice::Saved { photo, .. }) => {
            info!("Saved {} tinted {}", photo.path.display(), photo.color);
            Ok(())
        }
        Some(PhotoNotice::Failed { error, .. }) => {
            error!("Could not save photo: {}", error);
            anyhow::bail!(error)
        }
        None => anyhow::bail!("photo was not processed"),
    }
}

fn write_config(settings: &Settings, print: bool) -> anyhow::Result<()> {
    if print {
        if let Some(path) = Settings::path() {
            println!("# {}", path.display());
        }
        print!("{}", toml::to_string_pretty(settings)?);
        return Ok(());
    }
    let path = settings.save()?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    input.with_file_name(format!("{}_tinted.{}", stem, format.extension()))
}
