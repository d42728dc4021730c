//! flock-run: runs one headless episode and prints the fitness report.
//!
//! Usage:
//!   flock-run --agents 20 --seed 7
//!   flock-run --policies flock.json --tuning tuning.json --snapshots run.jsonl
//!   RUST_LOG=debug flock-run --realtime

mod pacing;
mod policies;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use flock_core::mask::SpriteSet;
use flock_core::state::EpisodeSnapshot;
use flock_core::tuning::Tuning;
use flock_sim::{Episode, SimConfig};

use crate::pacing::Pacer;
use crate::policies::PolicySpec;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of agents when no policy file is given
    #[arg(long, default_value = "10")]
    agents: usize,

    /// RNG seed for obstacle placement
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Generation label copied into snapshots and the report
    #[arg(long, default_value = "0")]
    generation: u32,

    /// Stop after this many ticks even if agents are alive
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Pace ticks at the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// JSON file with tuning overrides (missing fields keep their defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// JSON file with a list of policy descriptions
    #[arg(long)]
    policies: Option<PathBuf>,

    /// Write every snapshot as one JSON line to this file
    #[arg(long)]
    snapshots: Option<PathBuf>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

fn write_snapshot(out: &mut impl Write, snapshot: &EpisodeSnapshot) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let tuning: Tuning = match &args.tuning {
        Some(path) => read_json(path)?,
        None => Tuning::default(),
    };
    let specs: Vec<PolicySpec> = match &args.policies {
        Some(path) => read_json(path)?,
        None => policies::hover_flock(args.agents, 150.0, 350.0),
    };

    let tick_rate = tuning.tick_rate;
    let config = SimConfig {
        seed: args.seed,
        generation: args.generation,
        tuning,
        sprites: SpriteSet::procedural(),
    };
    let mut episode = Episode::new(config, policies::instantiate(&specs))
        .context("setting up the episode")?;

    let mut sink = match &args.snapshots {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };
    let mut pacer = args.realtime.then(|| Pacer::new(tick_rate));
    let mut write_error = None;

    let report = episode.run_with(args.max_ticks, |snapshot| {
        if write_error.is_none() {
            if let Some(out) = sink.as_mut() {
                if let Err(err) = write_snapshot(out, snapshot) {
                    write_error = Some(err);
                }
            }
        }
        if let Some(pacer) = pacer.as_mut() {
            pacer.wait();
        }
    });

    if let Some(err) = write_error {
        return Err(err.context("writing snapshots"));
    }
    if let Some(mut out) = sink {
        out.flush().context("flushing snapshots")?;
    }

    if let Some(best) = report.best() {
        log::info!(
            "best: {} with fitness {:.1} (score {}, {} ticks)",
            best.genome,
            best.fitness,
            report.score,
            report.ticks
        );
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::policy::{DecisionPolicy, Observation};

    #[test]
    fn test_policy_specs_parse() {
        let json = r#"[
            {"kind": "constant", "activation": 0.0},
            {"kind": "hover", "target_y": 250.0},
            {"kind": "linear", "weights": [0.01, -0.02, 0.0], "bias": -1.0}
        ]"#;
        let specs: Vec<PolicySpec> = serde_json::from_str(json).unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[1], PolicySpec::Hover { target_y: 250.0 });

        let mut hover = specs[1].build();
        let below = Observation {
            y: 300.0,
            gap_distance: 0.0,
            lookahead: 200.0,
        };
        assert_eq!(hover.decide(&below).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_unknown_policy_kind_rejected() {
        let json = r#"[{"kind": "telepathic"}]"#;
        assert!(serde_json::from_str::<Vec<PolicySpec>>(json).is_err());
    }

    #[test]
    fn test_hover_flock_spans_band() {
        let specs = policies::hover_flock(5, 150.0, 350.0);
        let targets: Vec<f64> = specs
            .iter()
            .map(|s| match s {
                PolicySpec::Hover { target_y } => *target_y,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(targets, vec![150.0, 200.0, 250.0, 300.0, 350.0]);
        assert_eq!(policies::hover_flock(1, 150.0, 350.0).len(), 1);
    }

    #[test]
    fn test_partial_tuning_file() {
        let tuning: Tuning = serde_json::from_str(r#"{"gap_size": 160.0}"#).unwrap();
        assert_eq!(tuning.gap_size, 160.0);
        assert_eq!(tuning.tick_rate, Tuning::default().tick_rate);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 30Hz = 33.333ms per tick
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(pacing::tick_duration(30).as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_instantiated_flock_runs() {
        let specs = policies::hover_flock(4, 200.0, 300.0);
        let mut episode = Episode::new(SimConfig::default(), policies::instantiate(&specs)).unwrap();
        let report = episode.run(Some(50));
        assert_eq!(report.entries.len(), 4);
        assert!(report.ticks <= 50);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["flock-run", "--agents", "3", "--max-ticks", "100"]).unwrap();
        assert_eq!(args.agents, 3);
        assert_eq!(args.max_ticks, Some(100));
        assert!(!args.realtime);
    }
}
