//! Measure objects in a photo next to a fiducial marker of known size.
//!
//! ```text
//! marker-measure --image desk.jpg --markers desk_markers.json --report desk.json
//! marker-measure --config job.json --min-area 500
//! ```

use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use marker_measure::pipeline::{load_image, measure_gray};
use marker_measure::render::annotate;
use marker_measure::report::MeasurementReport;
use marker_measure::{CornerOrdering, MarkerDetection, MeasureConfig};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "marker-measure", version, about)]
struct Cli {
    /// Input image (overrides `image_path` from --config).
    #[arg(short, long, required_unless_present = "config")]
    image: Option<PathBuf>,

    /// JSON job file; the flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Marker detections JSON from an external detector.
    #[arg(short, long)]
    markers: Option<PathBuf>,

    /// Real-world marker perimeter, in output units.
    #[arg(long)]
    known_perimeter: Option<f64>,

    /// Pixels per unit when no usable marker is found.
    #[arg(long)]
    fallback_scale: Option<f64>,

    /// Minimum contour area in px².
    #[arg(long)]
    min_area: Option<f64>,

    #[arg(long, value_enum)]
    corner_ordering: Option<OrderingArg>,

    /// Unit label printed after every measurement.
    #[arg(long)]
    unit: Option<String>,

    /// Write the JSON report here.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write an annotated copy of the image here.
    #[arg(long)]
    annotate: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Structured JSON logs via tracing (uses RUST_LOG for filtering).
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_log: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderingArg {
    Geometric,
    CoordinateSum,
}

impl From<OrderingArg> for CornerOrdering {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::Geometric => CornerOrdering::Geometric,
            OrderingArg::CoordinateSum => CornerOrdering::CoordinateSum,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // printed regardless of --log-level
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) {
    if cli.json_log {
        marker_measure::core::init_tracing(true);
    } else {
        let _ = marker_measure::core::init_with_level(cli.log_level);
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) {
    let _ = marker_measure::core::init_with_level(cli.log_level);
}

fn build_config(cli: &Cli) -> Result<MeasureConfig, Box<dyn Error>> {
    let mut cfg = match (&cli.config, &cli.image) {
        (Some(path), _) => MeasureConfig::load_json(path)?,
        (None, Some(image)) => MeasureConfig::for_image(image.display().to_string()),
        (None, None) => return Err("either --image or --config is required".into()),
    };

    if let Some(image) = &cli.image {
        cfg.image_path = image.display().to_string();
    }
    if let Some(markers) = &cli.markers {
        cfg.markers_path = Some(markers.display().to_string());
    }
    if let Some(report) = &cli.report {
        cfg.output_path = Some(report.display().to_string());
    }
    if let Some(annotated) = &cli.annotate {
        cfg.annotated_path = Some(annotated.display().to_string());
    }
    if let Some(unit) = &cli.unit {
        cfg.unit_label = unit.clone();
    }
    if let Some(v) = cli.known_perimeter {
        cfg.params.calibration.known_perimeter = v;
    }
    if let Some(v) = cli.fallback_scale {
        cfg.params.calibration.fallback_pixels_per_unit = v;
    }
    if let Some(v) = cli.min_area {
        cfg.params.measure.min_contour_area = v;
    }
    if let Some(ordering) = cli.corner_ordering {
        cfg.params.measure.corner_ordering = ordering.into();
    }
    Ok(cfg)
}

/// Unreadable detections are treated like "no marker found".
fn load_markers(path: Option<&str>) -> MarkerDetection {
    let Some(path) = path else {
        return MarkerDetection::default();
    };
    match MarkerDetection::load_json(path) {
        Ok(det) => det,
        Err(err) => {
            warn!("ignoring marker detections from {path}: {err}");
            MarkerDetection::default()
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let cfg = build_config(&cli)?;
    let markers = load_markers(cfg.markers_path.as_deref());

    let image = load_image(&cfg.image_path)?;
    let run = measure_gray(&image.to_luma8(), &markers, &cfg.params)?;
    let report = MeasurementReport::new(&cfg, run);

    for line in report.lines() {
        println!("{line}");
    }

    if let Some(path) = &cfg.output_path {
        report.write_json(path)?;
        info!("wrote report to {path}");
    }
    if let Some(path) = &cfg.annotated_path {
        annotate(&image, &report.objects).save(path)?;
        info!("wrote annotated image to {path}");
    }
    Ok(())
}
