// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HUEMAGIK: image-to-palette extraction.
//
// Entry point. Initialises logging, loads config, submits one image to the
// extraction service, prints the palette and writes the exports.

mod services;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use huemagik_acquire::AcquisitionController;
use huemagik_bridge::{DesktopBridge, NativeFilePicker, PlatformBridge};
use huemagik_core::config::{AppConfig, CONFIG_FILE};
use huemagik_core::cursor::LabelMode;
use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::human_errors::{HumanError, humanize_error, humanize_failure};
use huemagik_core::types::{AcquisitionState, ExportFormat, Palette};
use tracing::{error, info};

use services::{data_dir, export};

#[derive(Parser, Debug)]
#[command(name = "huemagik")]
#[command(about = "Extract a color palette from an image and export it as PNG / PDF")]
struct Cli {
    /// Image file to analyse (png, jpeg, gif, webp, bmp, tiff); opens a file
    /// picker when omitted
    image: Option<PathBuf>,

    /// Number of colors to request (3-9)
    #[arg(short, long)]
    colors: Option<u8>,

    /// Extraction service base URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Config file (defaults to config.json in the data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for palette.png / palette.pdf
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Export format; repeat for several (defaults to png and pdf)
    #[arg(short, long = "format")]
    formats: Vec<ExportFormat>,

    /// Only print the palette, write no files
    #[arg(long)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("HUEMAGIK starting");

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "run failed");
            report(&humanize_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;

    let bridge = Arc::new(DesktopBridge);
    info!(platform = bridge.platform_name(), "bridge ready");
    let source = match &cli.image {
        Some(path) => bridge.read_image(path)?,
        None => match bridge.pick_image()? {
            Some(source) => source,
            None => {
                eprintln!("No image selected.");
                return Ok(ExitCode::FAILURE);
            }
        },
    };

    let controller = AcquisitionController::from_config(&config, bridge)?;
    controller.submit_file(source);

    let palette = match controller.wait_settled().await {
        AcquisitionState::Ready(palette) => palette,
        AcquisitionState::Failed(failure) => {
            report(&humanize_failure(&failure));
            return Ok(ExitCode::FAILURE);
        }
        other => {
            return Err(HuemagikError::InvalidTransition(format!(
                "request settled in unexpected state {}",
                other.name()
            )));
        }
    };
    print_palette(&palette);

    if cli.no_export {
        return Ok(ExitCode::SUCCESS);
    }
    let formats = if cli.formats.is_empty() {
        export::default_formats()
    } else {
        export::dedup_formats(cli.formats)
    };
    let out_dir = cli.out.unwrap_or_else(data_dir::exports_dir);
    for path in export::write_exports(&controller, &formats, &out_dir)? {
        println!("wrote {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Config file first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| data_dir::data_dir().join(CONFIG_FILE));
    let mut config = AppConfig::load(&path)?;

    if let Some(colors) = cli.colors {
        config.color_count = colors;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout_secs {
        config.request_timeout_secs = timeout;
    }
    config.validate()?;
    Ok(config)
}

fn print_palette(palette: &Palette) {
    for (index, sample) in palette.iter().enumerate() {
        println!(
            "{:>2}. {}  {}",
            index + 1,
            LabelMode::Hex.label(sample),
            LabelMode::Rgb.label(sample)
        );
    }
}

fn report(human: &HumanError) {
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
}
