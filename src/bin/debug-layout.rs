/// Diagnostic tool: random sizes → spiral layout → shape and overlap checks
use rand::rngs::StdRng;
use rand::SeedableRng;
use tagcloud_rs::geometry::Point;
use tagcloud_rs::layout::{Direction, SpiralLayouter};
use tagcloud_rs::sizes::GenerationSettings;
use tagcloud_rs::verify::{find_overlaps, CloudStats};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tagcloud_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let count: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1_000);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(2024);

    println!("=== DIAGNOSTIC: Sizes → Spiral Layout ===");
    println!("Count: {count}, seed: {seed}");

    let settings = GenerationSettings {
        count,
        min_width: 2,
        max_width: 99,
        min_height: 2,
        max_height: 99,
    };
    let sizes = settings.generate(&mut StdRng::seed_from_u64(seed))?;
    println!("\n[1] Generated {} sizes", sizes.len());

    let mut layouter = SpiralLayouter::new(Point::ORIGIN);
    let start = std::time::Instant::now();
    for size in &sizes {
        layouter.put_next_rectangle(*size)?;
    }
    let elapsed = start.elapsed();
    println!(
        "\n[2] Layout computed in {:.2}ms ({:.1}µs per rectangle)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1e6 / sizes.len().max(1) as f64
    );
    println!(
        "    Spiral depth: {} of {} placed ({} popped while backtracking)",
        layouter.spiral().len(),
        layouter.len(),
        layouter.len() - layouter.spiral().len()
    );

    println!("\n[3] Attachment sides on the remaining spiral:");
    for direction in Direction::CARDINAL {
        let n = layouter
            .spiral()
            .iter()
            .filter(|e| e.direction_to_previous == direction)
            .count();
        println!("    {:?}: {}", direction, n);
    }

    println!("\n[4] Cloud shape:");
    match CloudStats::compute(layouter.rectangles(), layouter.center()) {
        Some(stats) => {
            println!("    Bounds:      {}", stats.bounds);
            println!("    Covered:     {} px²", stats.covered_area);
            println!("    Density:     {:.1}% of bounding box", stats.density * 100.0);
            println!("    Max radius:  {:.1}", stats.max_radius);
            println!("    Circle fill: {:.1}%", stats.circle_fill * 100.0);
        }
        None => println!("    (empty)"),
    }

    println!("\n[5] Checking for overlaps:");
    let overlaps = find_overlaps(layouter.rectangles());
    if overlaps.is_empty() {
        println!("    ✓ No overlapping pairs");
    } else {
        for (i, j) in overlaps.iter().take(10) {
            println!(
                "    ✗ #{} {} overlaps #{} {}",
                i,
                layouter.rectangles()[*i],
                j,
                layouter.rectangles()[*j]
            );
        }
        anyhow::bail!("{} overlapping pairs", overlaps.len());
    }

    Ok(())
}
