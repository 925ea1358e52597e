use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tagcloud_rs::geometry::{Point, Size};
use tagcloud_rs::layout::{CloudLayouter, SpiralLayouter};
use tagcloud_rs::render::{CloudCanvas, ColorMode, RenderConfig};
use tagcloud_rs::sizes::{self, GenerationSettings};
use tagcloud_rs::verify::CloudStats;

/// Pack rectangles into a spiral tag cloud and save it as a PNG.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Text file with one "<width> <height>" pair per line.
    #[arg(default_value = "in.txt")]
    input: PathBuf,

    /// Where to write the PNG.
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Generate sizes instead of reading INPUT: "<count> <minW> <maxW> <minH> <maxH>".
    #[arg(long, value_name = "SETTINGS")]
    random: Option<GenerationSettings>,

    /// Cloud center as "x,y".
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    center: Point,

    /// Seed for random sizes and colors. Picked at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Fill rectangles instead of outlining them.
    #[arg(long)]
    fill: bool,

    /// Outline thickness in pixels.
    #[arg(long, default_value_t = 1)]
    pen_width: u32,

    /// Coloring: random or spectrum.
    #[arg(long, default_value = "random")]
    colors: ColorMode,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tagcloud_rs=info".parse()?)
                .add_directive("tagcloud=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Cloud center {}, seed {}", args.center, seed);

    let mut layouter = SpiralLayouter::new(args.center);
    let mut canvas = CloudCanvas::new(args.center);
    let mut skipped = 0usize;

    match args.random {
        Some(settings) => {
            let sizes = settings.generate(&mut StdRng::seed_from_u64(seed))?;
            tracing::info!("Generated {} random sizes", sizes.len());
            for size in sizes {
                if !place(&mut layouter, &mut canvas, size)? {
                    skipped += 1;
                }
            }
        }
        None => {
            let file = File::open(&args.input)
                .with_context(|| format!("Failed to open {}", args.input.display()))?;
            for line in sizes::read_sizes(BufReader::new(file)) {
                let line =
                    line.with_context(|| format!("Failed to read {}", args.input.display()))?;
                let placed = match line.size {
                    Ok(size) => place(&mut layouter, &mut canvas, size)?,
                    Err(err) => {
                        tracing::warn!("Line {}: {}", line.line_number, err);
                        false
                    }
                };
                if !placed {
                    skipped += 1;
                }
            }
        }
    }

    let config = RenderConfig {
        fill: args.fill,
        pen_width: args.pen_width,
        color_mode: args.colors,
        seed,
        ..RenderConfig::default()
    };
    canvas
        .save_png(&args.output, &config)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Placed {} rectangles ({} skipped) -> {}",
        canvas.len(),
        skipped,
        args.output.display()
    );
    if let Some(stats) = CloudStats::compute(canvas.rects(), args.center) {
        println!(
            "Bounds {}, density {:.1}%, radius {:.1}",
            stats.bounds,
            stats.density * 100.0,
            stats.max_radius
        );
    }

    Ok(())
}

/// Place one size. Rejected sizes are reported and skipped (`Ok(false)`);
/// anything else the layouter reports ends the run.
fn place(
    layouter: &mut impl CloudLayouter,
    canvas: &mut CloudCanvas,
    size: Size,
) -> Result<bool> {
    match layouter.put_next_rectangle(size) {
        Ok(rect) => {
            canvas.add(rect);
            Ok(true)
        }
        Err(err) if err.is_recoverable() => {
            tracing::warn!("Skipping: {}", err);
            Ok(false)
        }
        Err(err) => Err(err).context("Layout failed"),
    }
}
