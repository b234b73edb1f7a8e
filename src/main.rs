//! hanzi-art CLI - Convert images to Han character art

use clap::Parser;
use hanzi_art::{BuildMode, ChannelBias, HanziArt, HanziError, RenderConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hanzi-art", about = "Convert images to Han character art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Unihan file with kTotalStrokes entries
    #[arg(long, default_value = "assets/Unihan_IRGSources.txt")]
    strokes: PathBuf,
    /// Unihan file with kFourCornerCode entries
    #[arg(long, default_value = "assets/Unihan_DictionaryLikeData.txt")]
    corners: PathBuf,
    /// JSON config file; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output width in characters
    #[arg(short, long)]
    width: Option<u32>,
    /// Densest stroke count used (1-25 recommended)
    #[arg(short = 's', long)]
    max_strokes: Option<u32>,
    /// Build mode: fast (per pixel) or complex (per 2x2 block)
    #[arg(short, long)]
    mode: Option<BuildMode>,
    /// Red, green and blue channel weights
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    bias: Option<Vec<f64>>,
    /// Invert the image
    #[arg(short, long)]
    invert: bool,
    /// Keep colour channels instead of converting to grayscale
    #[arg(long)]
    color: bool,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Write the art to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), HanziError> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(max) = args.max_strokes {
        config.max_stroke_count = max;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(bias) = &args.bias {
        config.bias = ChannelBias::new(bias[0], bias[1], bias[2]);
    }
    config.inverted |= args.invert;
    config.grayscale &= !args.color;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let art = HanziArt::from_unihan(&args.strokes, &args.corners)?.with_config(config)?;
    let image = image::open(&args.input)?;
    let output = art.convert(&image)?;

    match &args.output {
        Some(path) => std::fs::write(path, output)?,
        None => print!("{}", output),
    }
    Ok(())
}
