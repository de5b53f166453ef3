use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Sortledton workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the graph benchmarks and write a markdown report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Criterion baseline to save results under
        #[arg(long, default_value = "current")]
        baseline: String,

        /// Previously saved baseline to compare against
        #[arg(long)]
        compare: Option<String>,

        /// Enable the `parallel` feature while benchmarking
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

const BENCHES: &[&str] = &["graph_ops", "neighborhood"];

/// Mean throughput per workload, keyed by baseline name.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            baseline,
            compare,
            parallel,
        } => {
            if !report_only {
                run_benchmarks(quick, &baseline, parallel)?;
            }
            generate_report(&baseline, compare.as_deref())?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, baseline: &str, parallel: bool) -> Result<()> {
    println!("Compiling benchmarks...");
    let mut build = Command::new("cargo");
    build.args(["build", "--benches", "--release"]);
    if parallel {
        build.args(["--features", "parallel"]);
    }
    if !build.status()?.success() {
        bail!("failed to compile benchmarks");
    }

    for bench in BENCHES {
        println!("\n>>> Running bench: {bench}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.args(["bench", "--bench", bench]);
        if parallel {
            cmd.args(["--features", "parallel"]);
        }

        // Criterion arguments go after --
        cmd.arg("--").arg("--save-baseline").arg(baseline);
        if quick {
            cmd.args(["--measurement-time", "0.1", "--noplot", "--sample-size", "10"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run bench {bench}"))?;
        if status.success() {
            println!("Finished {bench} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: bench {bench} failed");
        }
    }

    Ok(())
}

fn generate_report(baseline: &str, compare: Option<&str>) -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, criterion_dir, &mut results)?;

    let report = render_report(&results, baseline, compare)?;
    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(report_path, report)
        .with_context(|| format!("failed to write {}", report_path.display()))?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn render_report(results: &Results, baseline: &str, compare: Option<&str>) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# Sortledton Benchmark Report")?;
    writeln!(out)?;

    match compare {
        Some(other) => {
            writeln!(out, "| Workload | {baseline} (ops/s) | {other} (ops/s) | Speedup |")?;
            writeln!(out, "|---|---|---|---|")?;
        }
        None => {
            writeln!(out, "| Workload | {baseline} (ops/s) |")?;
            writeln!(out, "|---|---|")?;
        }
    }

    for (workload, by_baseline) in results {
        let Some(&ops) = by_baseline.get(baseline) else {
            continue;
        };
        write!(out, "| {workload} | {} |", format_ops(ops))?;
        if let Some(other) = compare {
            match by_baseline.get(other) {
                Some(&prev) if prev > 0.0 => {
                    write!(out, " {} | **{:.2}x** |", format_ops(prev), ops / prev)?;
                }
                _ => write!(out, " N/A | - |")?,
            }
        }
        writeln!(out)?;
    }
    Ok(out)
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion output. Layout: `<root>/<workload...>/<baseline>/estimates.json`.
fn collect_results(root: &Path, dir: &Path, results: &mut Results) -> Result<()> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(());
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(root, &path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else {
            continue;
        };
        let Some(workload_dir) = baseline_dir.parent() else {
            continue;
        };
        let Some(baseline_name) = baseline_dir.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let workload_name = workload_dir
            .strip_prefix(root)
            .unwrap_or(workload_dir)
            .to_string_lossy()
            .replace('\\', "/");
        if baseline_name == "report" || workload_name.contains("report") {
            continue;
        }

        let elements = fs::read_to_string(workload_dir.join("benchmark.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| json.get("throughput")?.get("Elements")?.as_f64());

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("malformed estimates in {}", path.display()))?;
        let time_ns = json
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0);
        if time_ns <= 0.0 {
            continue;
        }

        let metric = elements.unwrap_or(1.0) * 1e9 / time_ns;
        results
            .entry(workload_name)
            .or_default()
            .insert(baseline_name.to_owned(), metric);
    }
    Ok(())
}
