//! Mournhold CLI - Command-line tool for inspecting TES3 game data.
//!
//! This is the main entry point for the Mournhold command-line application.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use mournhold::esm::records::{CellRecord, LandRecord};
use mournhold::prelude::*;

/// Mournhold - TES3 (Morrowind) game data inspection tool
#[derive(Parser)]
#[command(name = "mournhold")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Files to load, shared by every subcommand.
#[derive(Args)]
struct LoadArgs {
    /// ESM/ESP files in load order; later files override earlier ones
    #[arg(
        short,
        long = "input",
        env = "MOURNHOLD_LOAD_ORDER",
        value_delimiter = ',',
        required = true
    )]
    inputs: Vec<PathBuf>,

    /// Fail on duplicate identifiers or coordinates within a file
    #[arg(long, env = "MOURNHOLD_STRICT")]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the records of a load order
    Info {
        #[command(flatten)]
        load: LoadArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve an object identifier
    Lookup {
        #[command(flatten)]
        load: LoadArgs,

        /// Identifier to look up (case-insensitive)
        #[arg(long)]
        id: String,
    },

    /// Show the exterior cell and landscape at a grid coordinate
    Cell {
        #[command(flatten)]
        load: LoadArgs,

        /// Grid X coordinate
        #[arg(long, allow_negative_numbers = true)]
        x: i32,

        /// Grid Y coordinate
        #[arg(long, allow_negative_numbers = true)]
        y: i32,
    },

    /// List every diagnostic found while loading
    Check {
        #[command(flatten)]
        load: LoadArgs,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { load, json } => {
            cmd_info(&load, json)?;
        }
        Commands::Lookup { load, id } => {
            cmd_lookup(&load, &id)?;
        }
        Commands::Cell { load, x, y } => {
            cmd_cell(&load, GridCoord::new(x, y))?;
        }
        Commands::Check { load } => {
            cmd_check(&load)?;
        }
    }

    Ok(())
}

/// Load every file in parallel, then merge them in load order.
fn load(args: &LoadArgs) -> Result<EsmFile> {
    let options = LoadOptions::new().strict(args.strict);

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let files = args
        .inputs
        .par_iter()
        .map(|path| {
            let file_options = options.clone().source_name(path.display().to_string());
            let file = EsmFile::open_with(path, &file_options)
                .with_context(|| format!("Failed to load {}", path.display()));
            pb.inc(1);
            file
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let mut files = files.into_iter();
    let mut esm = files.next().unwrap_or_else(EsmFile::empty);
    for file in files {
        esm.merge(file);
    }

    info!(
        files = args.inputs.len(),
        records = esm.len(),
        objects = esm.object_count(),
        elapsed = ?start.elapsed(),
        "load order merged"
    );

    Ok(esm)
}

#[derive(Serialize)]
struct Summary<'a> {
    sources: &'a [String],
    masters: Vec<String>,
    records: usize,
    placeholders: usize,
    objects: usize,
    exterior_cells: usize,
    lands: usize,
    diagnostics: usize,
    kinds: Vec<KindCount>,
}

#[derive(Serialize)]
struct KindCount {
    tag: String,
    name: &'static str,
    count: usize,
}

impl<'a> Summary<'a> {
    fn new(esm: &'a EsmFile) -> Self {
        Self {
            sources: esm.sources(),
            masters: esm
                .header()
                .map(|h| h.masters.iter().map(|m| m.name.clone()).collect())
                .unwrap_or_default(),
            records: esm.len(),
            placeholders: esm.placeholder_count(),
            objects: esm.object_count(),
            exterior_cells: esm.exterior_cells().count(),
            lands: esm.lands().count(),
            diagnostics: esm.diagnostics().len(),
            kinds: esm
                .kinds()
                .into_iter()
                .map(|(kind, count)| KindCount {
                    tag: kind.tag().to_string(),
                    name: kind.name(),
                    count,
                })
                .collect(),
        }
    }
}

fn cmd_info(args: &LoadArgs, json: bool) -> Result<()> {
    let esm = load(args)?;
    let summary = Summary::new(&esm);

    if json {
        let out = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", out);
        return Ok(());
    }

    for source in summary.sources {
        println!("Source: {}", source);
    }
    if !summary.masters.is_empty() {
        println!("Masters: {}", summary.masters.join(", "));
    }
    println!();

    for kind in &summary.kinds {
        println!("{:>6} {:<20} {:>8}", kind.tag, kind.name, kind.count);
    }

    println!(
        "\nTotal: {} records ({} skipped), {} objects, {} exterior cells, {} landscapes, {} diagnostics",
        summary.records,
        summary.placeholders,
        summary.objects,
        summary.exterior_cells,
        summary.lands,
        summary.diagnostics
    );

    Ok(())
}

fn cmd_lookup(args: &LoadArgs, id: &str) -> Result<()> {
    let esm = load(args)?;

    let Some(record) = esm.object_by_id(id) else {
        anyhow::bail!("No record with identifier '{}'", id);
    };

    println!(
        "{} ({}) at offset {}{}",
        record.id().unwrap_or(id),
        record.kind(),
        record.offset(),
        if record.is_deleted() { ", deleted" } else { "" }
    );
    println!("{:#?}", record.data());

    Ok(())
}

fn cmd_cell(args: &LoadArgs, coord: GridCoord) -> Result<()> {
    let esm = load(args)?;

    let cell = esm.exterior_cell(coord);
    let land = esm.land(coord);
    if cell.is_none() && land.is_none() {
        anyhow::bail!("No exterior cell or landscape at {}", coord);
    }

    if let Some(cell) = cell {
        print_cell(coord, cell);
    }
    if let Some(land) = land {
        print_land(land);
    }

    Ok(())
}

fn print_cell(coord: GridCoord, cell: &CellRecord) {
    let name = if cell.name.is_empty() { "(wilderness)" } else { cell.name.as_str() };
    println!("Cell {}: {}", coord, name);
    if let Some(region) = &cell.region {
        println!("Region: {}", region);
    }

    println!("References: {}", cell.references.len());
    for reference in &cell.references {
        let position = reference.placement.position;
        println!(
            "  {:>6} {:<32} ({:.0}, {:.0}, {:.0}){}",
            reference.index,
            reference.object_id,
            position[0],
            position[1],
            position[2],
            if reference.deleted { " deleted" } else { "" }
        );
    }
}

fn print_land(land: &LandRecord) {
    println!("Landscape: data flags {:#x}", land.data_flags);

    if let Some(heightmap) = &land.heights {
        let heights = heightmap.heights();
        let min = heights.iter().copied().fold(f32::INFINITY, f32::min);
        let max = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        println!("Heights: {:.0} to {:.0}", min, max);
    }

    let textured = land.textures.iter().filter(|&&t| t != 0).count();
    if !land.textures.is_empty() {
        println!("Textures: {}/{} tiles textured", textured, land.textures.len());
    }
}

fn cmd_check(args: &LoadArgs) -> Result<()> {
    let esm = load(args)?;

    for diagnostic in esm.diagnostics() {
        println!("{:>10} {}", diagnostic.offset(), diagnostic);
    }

    let count = esm.diagnostics().len();
    println!("\n{} diagnostics in {} files", count, esm.sources().len());

    if args.strict && count > 0 {
        anyhow::bail!("{} diagnostics found in strict mode", count);
    }

    Ok(())
}
