//! RouterBOOT config section inspector
//! Lists the tag directory of the hard or soft config section in a flash dump

use routerboot2art::routerboot::{HARD_CFG_SIZE, ID_WLAN_DATA, ROUTERBOOT_OFFSET};
use routerboot2art::{find_magic, load_image, SectionMagic, TagReader};
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
    if args.len() < 2 {
        eprintln!("Usage: {} <routerboot.bin> [hard|soft]", args[0]);
        std::process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let kind = match args.get(2).map(String::as_str) {
        None | Some("hard") => SectionMagic::Hard,
        Some("soft") => SectionMagic::Soft,
        Some(other) => anyhow::bail!("Unknown section kind: {} (expected hard or soft)", other),
    };

    let image = load_image(input_path)?;
    println!("Loaded {} bytes from {}", image.len(), input_path.display());

    let offset = find_magic(&image, ROUTERBOOT_OFFSET, kind)
        .ok_or_else(|| anyhow::anyhow!("No {} config section found", kind))?;
    println!("Found {} config section at 0x{:05x}\n", kind, offset);

    // Config sections occupy a single 4 KiB flash block
    let window_end = (offset + HARD_CFG_SIZE).min(image.len());
    let reader = TagReader::new(&image[offset..window_end])
        .ok_or_else(|| anyhow::anyhow!("Unrecognized config section header"))?;

    let mut count = 0;
    for record in reader {
        let label = if record.id == ID_WLAN_DATA {
            "  (wireless calibration data)"
        } else {
            ""
        };
        println!(
            "tag {:>5}  {:>5} bytes @ 0x{:05x}{}",
            record.id,
            record.data.len(),
            offset + record.offset,
            label
        );
        print_preview(record.data);
        count += 1;
    }

    println!("\n{} tags", count);

    Ok(())
}

const PREVIEW: usize = 16;

fn print_preview(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let shown = &data[..data.len().min(PREVIEW)];
    print!("           ");
    for byte in shown {
        print!("{:02X} ", byte);
    }
    if data.len() > PREVIEW {
        print!("...");
    }

    print!(" |");
    for byte in shown {
        let c = if byte.is_ascii_graphic() || *byte == b' ' {
            *byte as char
        } else {
            '.'
        };
        print!("{}", c);
    }
    println!("|");
}
