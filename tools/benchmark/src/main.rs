use hdrhistogram::Histogram;
use std::hint::black_box;
use std::time::Instant;
use timing::{EntryType, TimingRegistry};

const ITERATIONS: usize = 100_000;

/// Registry pre-filled with `size` distinct marks.
fn filled_registry(size: usize) -> TimingRegistry {
    let mut registry = TimingRegistry::new();
    for i in 0..size {
        registry.mark(format!("mark-{}", i));
    }
    registry
}

fn new_histogram() -> anyhow::Result<Histogram<u64>> {
    Ok(Histogram::<u64>::new_with_bounds(1, 100_000_000, 3)?) // Up to 100ms
}

fn bench_mark_overwrite(size: usize) -> anyhow::Result<Histogram<u64>> {
    let mut hist = new_histogram()?;
    let mut registry = filled_registry(size);

    println!("Running mark overwrite benchmark ({} entries)...", size);

    for i in 0..ITERATIONS {
        let name = format!("mark-{}", i % size.max(1));
        let start = Instant::now();
        black_box(registry.mark(name));
        hist.record(start.elapsed().as_nanos() as u64)?;
    }
    Ok(hist)
}

fn bench_measure(size: usize) -> anyhow::Result<Histogram<u64>> {
    let mut hist = new_histogram()?;
    let mut registry = filled_registry(size);
    let last = format!("mark-{}", size.saturating_sub(1));

    println!("Running measure benchmark ({} entries)...", size);

    for _ in 0..ITERATIONS {
        let start = Instant::now();
        black_box(registry.measure("bench", None, Some(last.as_str()))?);
        hist.record(start.elapsed().as_nanos() as u64)?;
    }
    Ok(hist)
}

fn bench_entries(size: usize) -> anyhow::Result<Histogram<u64>> {
    let mut hist = new_histogram()?;
    let registry = filled_registry(size);
    let iterations = ITERATIONS / 10;

    println!("Running sorted retrieval benchmark ({} entries)...", size);

    for i in 0..iterations {
        let start = Instant::now();
        if i % 2 == 0 {
            black_box(registry.entries());
        } else {
            black_box(registry.entries_by_type(EntryType::Mark));
        }
        hist.record(start.elapsed().as_nanos() as u64)?;
    }
    Ok(hist)
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("\n--- {} Results (ns) ---", name);
    println!("Min:    {}", hist.min());
    println!("p50:    {}", hist.value_at_quantile(0.50));
    println!("p95:    {}", hist.value_at_quantile(0.95));
    println!("p99:    {}", hist.value_at_quantile(0.99));
    println!("Max:    {}", hist.max());
    println!("Mean:   {:.2}", hist.mean());
}

fn main() -> anyhow::Result<()> {
    println!("Clock origin: {:.6}", common::now_seconds());

    for size in [8, 64, 512] {
        let hist = bench_mark_overwrite(size)?;
        print_stats(&format!("mark/{}", size), &hist);

        let hist = bench_measure(size)?;
        print_stats(&format!("measure/{}", size), &hist);

        let hist = bench_entries(size)?;
        print_stats(&format!("entries/{}", size), &hist);
    }

    Ok(())
}
