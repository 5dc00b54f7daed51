use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::Path;

use indicatif::ProgressStyle;
use log::warn;
use tracing::info_span;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::LevelFilter;

use tracking_study::calibration::Calibrator;
use tracking_study::config::*;
use tracking_study::dataset::JsonlDataset;
use tracking_study::detector::RecordedDetector;
use tracking_study::error::TrackingError;
use tracking_study::report::{render, TrackingReport};
use tracking_study::study::TrackingStudy;
use tracking_study::tan::TanProjection;

#[derive(Parser)]
pub struct Args {
    /// exposures, one JSON object per line
    #[clap(short, default_value = "./data/exposures.jsonl")]
    pub input: String,
    /// gnomonic WCS shared by every exposure
    #[clap(short, default_value = "./wcs/wcs.json")]
    pub wcs: String,
    #[clap(flatten)]
    pub config: Config,
}

fn main() -> Result<()> {
    // parse the config
    let args = Args::parse();
    let config = args.config;

    // setup logging
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .with(LevelFilter::INFO)
        .init();

    let params = config.detector_params()?;
    let correspondence = config.correspondence()?;
    let mode = config.pairing_mode();

    println!("Running Tracking Study: {}", config.title);
    println!("Will use {} star finder algorithm to locate sources.", params.kind);
    println!("Will compare all captures relative to WCS specified by: {}", args.wcs);

    let calibrator = TanProjection::from_json_file(Path::new(&args.wcs))?;
    let mut dataset = JsonlDataset::new(Path::new(&args.input))?;
    let study = TrackingStudy::from_loader(&mut dataset, &RecordedDetector, &params, &calibrator)
        .context("Failed to load tracking study")?;

    println!(" Found {} captures to consider", study.len());
    for frame in &study.frames {
        println!("   {} {} ({} sources)", frame.frame_index, frame.name, frame.sources.len());
    }

    println!();
    println!("Calculated Pixel Size: {:.4} [''/pix]", calibrator.pixel_scale());
    println!();
    println!("Begin Tracking Analysis");

    let header_span = info_span!("header");
    header_span.pb_set_style(&ProgressStyle::default_bar());
    header_span.pb_set_length(mode.count(study.len()) as u64);
    let header_span_enter = header_span.enter();

    let mut reports = vec![];
    for pair in mode.pairs(study.len()) {
        Span::current().pb_inc(1);
        match TrackingReport::build(&study.frames, pair, correspondence) {
            Ok(report) => reports.push(report),
            Err(err @ TrackingError::DegenerateTimeDelta { .. }) => {
                warn!("Skipping captures {} and {}: {}", pair.first, pair.last, err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    std::mem::drop(header_span_enter);
    std::mem::drop(header_span);

    // the progress bar is gone, stdout is ours again
    println!("{}", render(&reports, config.json)?);

    Ok(())
}
