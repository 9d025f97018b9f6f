use anyhow::{Context, Result};
use clap::Parser;
use splitter::shell::{Session, USAGE};
use splitter::{SplitterConfig, DEFAULT_OUTPUT_DIR, DEFAULT_PICK_RADIUS};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Split an image into tiles by placing cut lines, then export every tile.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image to split. Prompted for when omitted.
    image: Option<PathBuf>,

    /// Directory tiles are exported to. Must already exist.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Click distance within which an existing point is picked.
    #[arg(short, long, default_value_t = DEFAULT_PICK_RADIUS)]
    pick_radius: u32,

    /// Crop and encode tiles in parallel when exporting.
    #[arg(long)]
    parallel: bool,
}

fn prompt_for_image(input: &mut impl BufRead) -> Result<PathBuf> {
    print!("Image file: ");
    io::stdout().flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read image path")?;
    let path = line.trim();
    anyhow::ensure!(!path.is_empty(), "No image selected");
    Ok(PathBuf::from(path))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    println!("{USAGE}\nTo start, pick an image file.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let image = match args.image {
        Some(path) => path,
        None => prompt_for_image(&mut input)?,
    };

    let config = SplitterConfig::new(args.pick_radius, args.output, args.parallel);
    let mut session = Session::open(&image, config)
        .with_context(|| format!("Failed to open {}", image.display()))?;

    let canvas = session.model().canvas();
    tracing::info!(
        "Splitting {} ({}x{})",
        image.display(),
        canvas.width,
        canvas.height
    );

    session.run(input, io::stdout())?;
    Ok(())
}
