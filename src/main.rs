//! Command-line front end for the scheduling simulator.
//!
//! Loads a process set from a JSON file (or generates one from a seed),
//! runs one or all algorithms, and prints the execution log, a metrics
//! table, and a comparison of the algorithms that ran.
//!
//! Input file format:
//!
//! ```json
//! {
//!   "config": { "default_quantum": 2 },
//!   "processes": [
//!     { "pid": 1, "arrival": 0, "burst": 5 },
//!     { "pid": 2, "arrival": 1, "burst": 3, "priority": 1 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use schedsim::models::{Pid, ProcessRecord};
use schedsim::workload::{random_processes, WorkloadSpec};
use schedsim::{Algorithm, Metric, SimulationReport, Simulator, SimulatorConfig};

/// Simulate CPU scheduling algorithms and compare their metrics.
#[derive(Parser, Debug)]
#[command(name = "schedsim", version, about, long_about = None)]
struct Args {
    /// JSON file with the process set (and optional config)
    #[arg(short, long, conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Generate this many random processes instead of reading a file
    #[arg(short, long)]
    random: Option<u32>,

    /// Seed for --random
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Algorithm name or alias (fcfs, sjf, srtf, priority, rr), or "all"
    #[arg(short, long, default_value = "all")]
    algorithm: String,

    /// Round-robin quantum (overrides the config file)
    #[arg(short, long)]
    quantum: Option<i64>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log every scheduling decision
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct InputFile {
    #[serde(default)]
    config: SimulatorConfig,
    processes: Vec<ProcessEntry>,
}

#[derive(Debug, Deserialize)]
struct ProcessEntry {
    pid: Pid,
    arrival: i64,
    burst: i64,
    #[serde(default)]
    priority: i32,
}

impl From<ProcessEntry> for ProcessRecord {
    fn from(e: ProcessEntry) -> Self {
        ProcessRecord::new(e.pid, e.arrival, e.burst).with_priority(e.priority)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let (config, processes) = load_processes(&args)?;
    let sim = Simulator::with_config(config);
    sim.add_processes(processes).context("process set rejected")?;

    let algorithms = if args.algorithm.eq_ignore_ascii_case("all") {
        Algorithm::ALL.to_vec()
    } else {
        vec![args.algorithm.parse::<Algorithm>()?]
    };

    let mut reports = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let report = sim
            .run_simulation(algorithm, args.quantum)
            .with_context(|| format!("{algorithm} failed"))?;
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        print_report(report);
    }
    if let Ok(cmp) = sim.comparison() {
        println!("== Comparison ==");
        for metric in Metric::ALL {
            if let Some(best) = cmp.best(metric) {
                println!("  best {metric:<10} {best}");
            }
        }
    }
    Ok(())
}

fn load_processes(args: &Args) -> Result<(SimulatorConfig, Vec<ProcessRecord>)> {
    if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let input: InputFile = serde_json::from_str(&text)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        let processes = input.processes.into_iter().map(ProcessRecord::from).collect();
        return Ok((input.config, processes));
    }
    if let Some(count) = args.random {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let processes = random_processes(&mut rng, &WorkloadSpec::new(count));
        return Ok((SimulatorConfig::default(), processes));
    }
    bail!("either --input or --random is required")
}

fn print_report(report: &SimulationReport) {
    match report.quantum {
        Some(q) => println!("== {} (quantum {q}) ==", report.algorithm),
        None => println!("== {} ==", report.algorithm),
    }
    for line in report.timeline.execution_log() {
        println!("  {line}");
    }
    println!(
        "  {:>5} {:>7} {:>5} {:>5} {:>5} {:>5} {:>5}",
        "PID", "Arrival", "Burst", "CT", "TAT", "WT", "RT"
    );
    for m in &report.metrics {
        println!(
            "  {:>5} {:>7} {:>5} {:>5} {:>5} {:>5} {:>5}",
            m.pid,
            m.arrival_time,
            m.burst_time,
            m.completion_time,
            m.turnaround_time,
            m.waiting_time,
            m.response_time
        );
    }
    println!("  {}", report.result.summary());
    println!(
        "  CPU utilization: {:.1}%\n",
        report.timeline.cpu_utilization() * 100.0
    );
}
