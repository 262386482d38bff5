//! RouterBOOT to ART converter
//! Extracts the wireless calibration blob from a RouterBOOT flash dump

use routerboot2art::{extract_art, load_image, save_art, ART_SIZE};
use std::env;
use std::path::Path;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <routerboot.bin> <art.bin>", args[0]);
        std::process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let output_path = Path::new(&args[2]);

    let image = load_image(input_path)?;
    tracing::info!("Read {} bytes from {}", image.len(), input_path.display());

    let mut art = vec![0u8; ART_SIZE];
    extract_art(&image, &mut art)?;

    save_art(output_path, &art)?;
    tracing::info!(
        "Wrote {} byte calibration blob to {}",
        art.len(),
        output_path.display()
    );

    Ok(())
}
