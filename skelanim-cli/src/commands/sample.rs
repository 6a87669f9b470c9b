//! Skinning matrix sampling

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use glam::Mat4;
use log::debug;
use serde::Serialize;
use skelanim::Rig;
use skelanim::convention::{MatrixLayout, pack_matrices};
use std::path::PathBuf;

use crate::commands::load_rig;
use crate::utils::{format_matrix, format_seconds};

#[derive(Args)]
pub struct SampleArgs {
    /// Rig description file (built-in arm rig when omitted)
    pub rig: Option<PathBuf>,

    /// Absolute clip time to evaluate (repeatable); the cursor is not advanced
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        conflicts_with_all = ["delta", "ticks", "all"]
    )]
    pub time: Vec<f32>,

    /// Seconds elapsed per tick
    #[arg(long, default_value_t = 1.0 / 60.0, allow_negative_numbers = true)]
    pub delta: f32,

    /// Number of ticks to run
    #[arg(long, default_value_t = 1)]
    pub ticks: usize,

    /// Print every tick instead of only the last one
    #[arg(long)]
    pub all: bool,

    /// Also print the placement of every skin part
    #[arg(long)]
    pub parts: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: SampleFormat,

    /// Matrix element order
    #[arg(long, value_enum, default_value = "column")]
    pub layout: LayoutArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SampleFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayoutArg {
    Column,
    Row,
}

impl From<LayoutArg> for MatrixLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Column => MatrixLayout::ColumnMajor,
            LayoutArg::Row => MatrixLayout::RowMajor,
        }
    }
}

/// One evaluated pose
struct Sample {
    tick: Option<usize>,
    time: f32,
    finals: Vec<Mat4>,
    parts: Option<Vec<Mat4>>,
}

#[derive(Serialize)]
struct SampleReport<'a> {
    rig: &'a str,
    layout: MatrixLayout,
    samples: Vec<SampleRecord>,
}

#[derive(Serialize)]
struct SampleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<usize>,
    time: f32,
    bones: Vec<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parts: Option<Vec<Vec<f32>>>,
}

pub fn execute(args: SampleArgs) -> Result<()> {
    let mut rig = load_rig(args.rig.as_deref())?;
    let layout = MatrixLayout::from(args.layout);

    let samples = if args.time.is_empty() {
        run_ticks(&mut rig, &args)?
    } else {
        evaluate_times(&rig, &args)?
    };

    match args.format {
        SampleFormat::Table => print_table(&rig, &samples, layout),
        SampleFormat::Json => print_json(&rig, &samples, layout)?,
    }
    Ok(())
}

fn run_ticks(rig: &mut Rig, args: &SampleArgs) -> Result<Vec<Sample>> {
    if args.ticks == 0 {
        bail!("--ticks must be at least 1");
    }
    debug!("Running {} ticks of {}s", args.ticks, args.delta);

    let mut samples = Vec::new();
    for tick in 1..=args.ticks {
        rig.update(args.delta)
            .with_context(|| format!("Tick {tick} failed"))?;
        if args.all || tick == args.ticks {
            let parts = if args.parts {
                Some(rig.part_transforms()?)
            } else {
                None
            };
            samples.push(Sample {
                tick: Some(tick),
                time: rig.animation().cursor(),
                finals: rig.finals().to_vec(),
                parts,
            });
        }
    }
    Ok(samples)
}

fn evaluate_times(rig: &Rig, args: &SampleArgs) -> Result<Vec<Sample>> {
    args.time
        .iter()
        .map(|&time| {
            let finals = rig
                .evaluate_at(time)
                .with_context(|| format!("Cannot evaluate at time {time}"))?;
            let parts = if args.parts {
                Some(rig.skin().part_transforms(&finals)?)
            } else {
                None
            };
            Ok(Sample {
                tick: None,
                time,
                finals,
                parts,
            })
        })
        .collect()
}

fn bone_label(rig: &Rig, index: usize) -> String {
    match rig.skeleton().bone(index).and_then(|b| b.name.as_deref()) {
        Some(name) => format!("Bone {index} ({name})"),
        None => format!("Bone {index}"),
    }
}

fn print_table(rig: &Rig, samples: &[Sample], layout: MatrixLayout) {
    for sample in samples {
        match sample.tick {
            Some(tick) => println!("Tick {tick} @ {}", format_seconds(sample.time)),
            None => println!("Time {}", format_seconds(sample.time)),
        }
        for (index, m) in sample.finals.iter().enumerate() {
            println!("  {}:", bone_label(rig, index));
            for line in format_matrix(m, layout).lines() {
                println!("    {line}");
            }
        }
        if let Some(parts) = &sample.parts {
            for (part, m) in rig.skin().parts().iter().zip(parts) {
                println!("  Part {} on bone {}:", part.mesh_name, part.bone);
                for line in format_matrix(m, layout).lines() {
                    println!("    {line}");
                }
            }
        }
        println!();
    }
}

fn print_json(rig: &Rig, samples: &[Sample], layout: MatrixLayout) -> Result<()> {
    let pack = |matrices: &[Mat4]| -> Vec<Vec<f32>> {
        matrices
            .iter()
            .map(|m| pack_matrices(std::slice::from_ref(m), layout))
            .collect()
    };

    let report = SampleReport {
        rig: rig.name(),
        layout,
        samples: samples
            .iter()
            .map(|s| SampleRecord {
                tick: s.tick,
                time: s.time,
                bones: pack(&s.finals),
                parts: s.parts.as_deref().map(pack),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize samples")?;
    println!("{json}");
    Ok(())
}
