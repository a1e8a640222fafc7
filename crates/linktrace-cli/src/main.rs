//! linktrace CLI - trace joint-driven point paths from linkage documents.
//!
//! Loads a linkage document, runs the trace sweep against the in-memory
//! world, and reports the fitted curves.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use linktrace_host::LinkageWorld;
use linktrace_ir::LinkageDocument;
use linktrace_sweep::{trace, FaultReporter, Notifier, TraceSelections};

#[derive(Parser)]
#[command(name = "linktrace")]
#[command(about = "Trace the paths swept by linkage points as a joint turns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace point paths on a reference plane and fit closed splines
    Trace {
        /// Input linkage document (.json)
        file: PathBuf,
        /// Id of the driving joint
        #[arg(short, long)]
        joint: String,
        /// Id of the planar reference to sketch on
        #[arg(short, long)]
        reference: String,
        /// Id of a point to trace (repeat for multiple points)
        #[arg(short, long = "point", required = true)]
        points: Vec<String>,
        /// Write the fitted curves to this file as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Where to write the diagnostic log on failure
        #[arg(long, default_value = "trace.log")]
        log: PathBuf,
    },
    /// Display information about a linkage document
    Info {
        /// Path to the linkage document (.json)
        file: PathBuf,
    },
}

/// Notifier that surfaces trace failures on stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// One exported curve: the tracked point it belongs to and the samples the
/// spline interpolates (loop form, last == first).
#[derive(Serialize)]
struct CurveExport {
    point: String,
    fixed: bool,
    samples: Vec<[f64; 3]>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            file,
            joint,
            reference,
            points,
            out,
            log,
        } => run_trace(&file, joint, reference, points, out.as_deref(), &log),
        Commands::Info { file } => show_info(&file),
    }
}

fn load_document(path: &std::path::Path) -> Result<LinkageDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    LinkageDocument::from_json(&json)
        .with_context(|| format!("parsing {}", path.display()))
}

fn run_trace(
    file: &std::path::Path,
    joint: String,
    reference: String,
    points: Vec<String>,
    out: Option<&std::path::Path>,
    log: &std::path::Path,
) -> Result<()> {
    let doc = load_document(file)?;
    let mut world = LinkageWorld::from_document(doc)?;

    let selections = TraceSelections {
        joint: Some(joint),
        reference: Some(reference),
        points,
    };

    let outcome = match trace(&mut world, &selections) {
        Ok(outcome) => outcome,
        Err(err) => {
            let reporter = FaultReporter::new(log);
            if let Err(io_err) = reporter.report(&err, &mut StderrNotifier) {
                tracing::warn!(%io_err, "could not write diagnostic log");
            }
            anyhow::bail!("trace failed (diagnostic written to {})", log.display());
        }
    };

    let sketch = world
        .working_sketch(outcome.sketch)
        .context("working sketch missing after a successful trace")?;
    println!(
        "Traced {} point(s): {} closed curve(s) of {} samples each",
        selections.points.len(),
        sketch.curves().len(),
        outcome.samples_per_curve,
    );

    if let Some(out) = out {
        let exports: Vec<CurveExport> = outcome
            .curves
            .iter()
            .zip(&selections.points)
            .map(|(&curve, point)| {
                let spline = &sketch.curves()[curve];
                CurveExport {
                    point: point.clone(),
                    fixed: spline.is_fixed,
                    samples: spline.points().iter().map(|p| [p.x, p.y, p.z]).collect(),
                }
            })
            .collect();
        let json = serde_json::to_string_pretty(&exports)?;
        fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote curves to {}", out.display());
    }

    Ok(())
}

fn show_info(file: &std::path::Path) -> Result<()> {
    let doc = load_document(file)?;

    println!("Linkage document v{}", doc.version);
    println!("  bodies:     {}", doc.bodies.len());
    println!("  joints:     {}", doc.joints.len());
    for joint in &doc.joints {
        let min = joint
            .limits
            .minimum
            .map_or("unbounded".to_string(), |v| format!("{v:.4} rad"));
        let max = joint
            .limits
            .maximum
            .map_or("unbounded".to_string(), |v| format!("{v:.4} rad"));
        println!(
            "    {} -> body {} (value {:.4} rad, min {min}, max {max})",
            joint.id, joint.body, joint.value
        );
    }
    println!("  references: {}", doc.references.len());
    println!("  points:     {}", doc.points.len());
    println!("  sketches:   {}", doc.sketches.len());

    Ok(())
}
