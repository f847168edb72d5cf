use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use tracing_subscriber::EnvFilter;
use widecol::{
    AggregationAnalytic, AggregationResult, ColumnFamilyStore, ProjectionQuery, StoreOptions,
    Value, fields,
};

const USER_CF: &str = "Datos_Usuario";
const GEO_CF: &str = "Datos_Geograficos";
const METRICS_CF: &str = "Datos_Metricas";

const CITIES: [(&str, &str); 6] = [
    ("Peru", "Lima"),
    ("Peru", "Cusco"),
    ("Peru", "Arequipa"),
    ("Chile", "Santiago"),
    ("Colombia", "Bogota"),
    ("Mexico", "Monterrey"),
];

/// Benchmark configuration
struct BenchConfig {
    num_keys: usize,
    num_queries: usize,
    parallel_scan_threshold: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            num_keys: 100_000,
            num_queries: 50,
            parallel_scan_threshold: StoreOptions::default().parallel_scan_threshold,
        }
    }
}

/// Statistics for a benchmark run
struct BenchStats {
    duration: Duration,
    operations: usize,
    latencies: Vec<Duration>,
}

impl BenchStats {
    fn new() -> Self {
        BenchStats {
            duration: Duration::ZERO,
            operations: 0,
            latencies: Vec::new(),
        }
    }

    fn ops_per_sec(&self) -> f64 {
        self.operations as f64 / self.duration.as_secs_f64()
    }

    fn avg_latency_us(&self) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }
        let sum: u128 = self.latencies.iter().map(|d| d.as_micros()).sum();
        sum as f64 / self.latencies.len() as f64
    }

    fn percentile_latency_us(&mut self, percentile: f64) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }
        self.latencies.sort();
        let idx = ((self.latencies.len() as f64 * percentile / 100.0) as usize)
            .min(self.latencies.len() - 1);
        self.latencies[idx].as_micros() as f64
    }

    fn print_summary(&mut self, name: &str) {
        println!("\n{}", "=".repeat(60));
        println!("Benchmark: {}", name);
        println!("{}", "=".repeat(60));
        println!("Operations:     {:>12}", format_number(self.operations));
        println!("Duration:       {:>12.2} sec", self.duration.as_secs_f64());
        println!("Throughput:     {:>12.0} ops/sec", self.ops_per_sec());
        println!("\nLatency (microseconds):");
        println!("  Average:      {:>12.2}", self.avg_latency_us());
        println!("  P50:          {:>12.2}", self.percentile_latency_us(50.0));
        println!("  P95:          {:>12.2}", self.percentile_latency_us(95.0));
        println!("  P99:          {:>12.2}", self.percentile_latency_us(99.0));
        println!("{}", "=".repeat(60));
    }
}

fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Progress indicator
struct ProgressBar {
    total: usize,
    current: usize,
    last_update: Instant,
}

impl ProgressBar {
    fn new(total: usize) -> Self {
        ProgressBar {
            total,
            current: 0,
            last_update: Instant::now(),
        }
    }

    fn update(&mut self, current: usize) {
        self.current = current;
        if self.last_update.elapsed() > Duration::from_millis(100) {
            self.display();
            self.last_update = Instant::now();
        }
    }

    fn finish(&mut self) {
        self.current = self.total;
        self.display();
        println!();
    }

    fn display(&self) {
        let total = self.total.max(1);
        let percent = (self.current as f64 / total as f64 * 100.0) as usize;
        let bar_width = 40;
        let filled = (bar_width * self.current) / total;
        let bar = "=".repeat(filled) + &" ".repeat(bar_width - filled);
        print!(
            "\r[{}] {:>3}% ({}/{})",
            bar,
            percent,
            format_number(self.current),
            format_number(self.total)
        );
        let _ = io::stdout().flush();
    }
}

/// Insert one synthetic user into all three families
fn bench_fill(store: &ColumnFamilyStore, config: &BenchConfig) -> widecol::Result<BenchStats> {
    println!(
        "\n🗂️  Filling store with {} keys...",
        format_number(config.num_keys)
    );
    let mut stats = BenchStats::new();
    let mut progress = ProgressBar::new(config.num_keys);

    // Simple LCG for a deterministic spread of cities and amounts
    let mut x = 123456789u64;
    let start = Instant::now();
    for i in 0..config.num_keys {
        x = x.wrapping_mul(1103515245).wrapping_add(12345);
        let (pais, ciudad) = CITIES[(x >> 16) as usize % CITIES.len()];
        let key = format!("user{:08}", i);

        let op_start = Instant::now();
        store.insert(
            &key,
            [
                (
                    USER_CF,
                    fields([
                        ("nombre", Value::from(format!("Usuario {i}"))),
                        ("email", Value::from(format!("user{i}@example.com"))),
                    ]),
                ),
                (GEO_CF, fields([("pais", pais), ("ciudad", ciudad)])),
                (
                    METRICS_CF,
                    fields([
                        ("visitas", Value::Int((x % 500) as i64)),
                        ("gasto_total", Value::Float((x % 10_000) as f64 / 10.0)),
                        ("gasto_publicitario", Value::Float((x % 2_000) as f64 / 4.0)),
                    ]),
                ),
            ],
        )?;
        stats.latencies.push(op_start.elapsed());
        stats.operations += 1;

        if i % 1000 == 0 {
            progress.update(i);
        }
    }
    progress.finish();
    stats.duration = start.elapsed();

    Ok(stats)
}

/// Project one column out of the metrics family
fn bench_projection(
    store: &ColumnFamilyStore,
    config: &BenchConfig,
) -> widecol::Result<BenchStats> {
    println!("\n🔍 Running projection benchmark...");
    let mut stats = BenchStats::new();
    let query = ProjectionQuery::new(store);

    let start = Instant::now();
    for _ in 0..config.num_queries {
        let op_start = Instant::now();
        let result = query.run(METRICS_CF, &["gasto_publicitario"])?;
        stats.latencies.push(op_start.elapsed());

        if let Some(metrics) = result.metrics() {
            stats.operations += 1;
            if stats.operations == 1 {
                println!(
                    "   columns ignored: {} (bandwidth saved), cells skipped: {}",
                    metrics.ignored_column_count,
                    format_number(metrics.cells_skipped)
                );
            }
        }
    }
    stats.duration = start.elapsed();

    Ok(stats)
}

/// Group advertising spend by city
fn bench_aggregation(
    store: &ColumnFamilyStore,
    config: &BenchConfig,
) -> widecol::Result<BenchStats> {
    println!("\n📊 Running aggregation benchmark...");
    let mut stats = BenchStats::new();
    let analytic = AggregationAnalytic::new(store);

    let start = Instant::now();
    let mut last = None;
    for _ in 0..config.num_queries {
        let op_start = Instant::now();
        let result = analytic.run(GEO_CF, "ciudad", METRICS_CF, "gasto_publicitario")?;
        stats.latencies.push(op_start.elapsed());
        stats.operations += 1;
        last = Some(result);
    }
    stats.duration = start.elapsed();

    match last {
        Some(AggregationResult::Groups(groups)) => {
            for (city, spend) in &groups {
                println!("   {:<12} {:>16.2}", city.to_string(), spend.as_f64().unwrap_or(0.0));
            }
        },
        Some(AggregationResult::Unavailable(reason)) => println!("   unavailable: {reason}"),
        None => {},
    }

    Ok(stats)
}

fn main() -> widecol::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("\n🚀 widecol Benchmark Tool");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    let config = BenchConfig::default();

    println!("Configuration:");
    println!("  Keys:           {}", format_number(config.num_keys));
    println!("  Queries:        {}", config.num_queries);
    println!(
        "  Parallel scan:  >= {} rows",
        format_number(config.parallel_scan_threshold)
    );

    let options = StoreOptions {
        parallel_scan_threshold: config.parallel_scan_threshold,
        ..Default::default()
    };
    let store = ColumnFamilyStore::open(&[USER_CF, GEO_CF, METRICS_CF], options)?;

    let mut fill_stats = bench_fill(&store, &config)?;
    fill_stats.print_summary("Row Mutation (fill)");

    let mut projection_stats = bench_projection(&store, &config)?;
    projection_stats.print_summary("Projection (1 of 3 columns)");

    let mut aggregation_stats = bench_aggregation(&store, &config)?;
    aggregation_stats.print_summary("Aggregation (spend by city)");

    println!("\n📈 Store Statistics:");
    for line in store.statistics().report().lines() {
        println!("    {}", line);
    }

    println!("\n✅ Benchmark completed!");
    Ok(())
}
