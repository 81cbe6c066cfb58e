// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RoomScan CLI - room/object bounding boxes from colour-coded scans.
//!
//! Every sub-folder of the root directory is one building holding the
//! exported mesh (`output_file.obj`), its material textures and the
//! semantic annotation table (`<scene>.semantic.txt`).
//!
//! # Commands
//!
//! - `roomscan extract [ROOT]` - write `<folder>_structure.json` plus room
//!   and object wireframes for every building
//! - `roomscan wireframes [ROOT]` - rebuild the wireframes from existing
//!   structure JSON files

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use roomscan_processing::{
    process_all_folders, process_folder, regenerate_all_folders, regenerate_wireframes,
    BatchSummary, FolderOutcome, PipelineConfig,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roomscan", version, about)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Worker threads for batch processing (default: one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the building structure of every building folder
    Extract {
        #[command(flatten)]
        target: Target,

        /// Mesh file name inside each folder
        #[arg(long, default_value = "output_file.obj")]
        mesh_file: String,

        /// Suffix of the annotation table after the scene name
        #[arg(long, default_value = ".semantic.txt")]
        annotation_suffix: String,

        /// File extension of material textures
        #[arg(long, default_value = "png")]
        texture_extension: String,

        /// Do not write room/object wireframes
        #[arg(long)]
        no_wireframes: bool,

        /// Also write one wireframe per object
        #[arg(long)]
        per_object: bool,
    },
    /// Regenerate wireframes from existing structure JSON files
    Wireframes {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Root directory containing one folder per building
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Treat ROOT itself as a single building folder
    #[arg(long)]
    single: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = PipelineConfig {
        worker_threads: cli.threads,
        ..Default::default()
    };

    match cli.command {
        Command::Extract {
            target,
            mesh_file,
            annotation_suffix,
            texture_extension,
            no_wireframes,
            per_object,
        } => {
            config.mesh_file_name = mesh_file;
            config.annotation_suffix = annotation_suffix;
            config.texture_extension = texture_extension;
            config.write_wireframes = !no_wireframes;
            config.per_object_wireframes = per_object;

            if target.single {
                run_single(&target.root, || process_folder(&target.root, &config))
            } else {
                let summary = process_all_folders(&target.root, &config)
                    .with_context(|| format!("Cannot scan {}", target.root.display()))?;
                finish(summary)
            }
        }
        Command::Wireframes { target } => {
            if target.single {
                run_single(&target.root, || regenerate_wireframes(&target.root, &config))
            } else {
                let summary = regenerate_all_folders(&target.root, &config)
                    .with_context(|| format!("Cannot scan {}", target.root.display()))?;
                finish(summary)
            }
        }
    }
}

fn run_single<F>(folder: &Path, job: F) -> Result<()>
where
    F: FnOnce() -> roomscan_processing::Result<FolderOutcome>,
{
    match job().with_context(|| format!("Failed to process {}", folder.display()))? {
        FolderOutcome::Processed(report) => {
            tracing::info!(
                building = %report.building_name,
                rooms = report.stats.rooms,
                objects = report.stats.objects,
                outputs = report.outputs.len(),
                "Done"
            );
            for path in &report.outputs {
                println!("{}", path.display());
            }
            Ok(())
        }
        FolderOutcome::Skipped { missing } => {
            let names: Vec<_> = missing.iter().map(|p| p.display().to_string()).collect();
            bail!("Missing required files: {}", names.join(", "))
        }
    }
}

fn finish(summary: BatchSummary) -> Result<()> {
    tracing::info!(
        processed = summary.processed.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "Batch summary"
    );
    for folder in &summary.skipped {
        tracing::warn!(folder = %folder.display(), "Skipped");
    }
    for (folder, error) in &summary.failed {
        tracing::error!(folder = %folder.display(), error = %error, "Failed");
    }

    if !summary.is_success() {
        bail!("{} of {} folders failed", summary.failed.len(), summary.total());
    }
    Ok(())
}
