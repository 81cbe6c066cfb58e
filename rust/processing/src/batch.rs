// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch driver: every immediate sub-folder of a root is one building.
//!
//! Buildings share no state, so folders run in parallel. A failing folder is
//! logged and recorded; it never stops the batch.

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::pipeline::{process_folder, regenerate_wireframes, FolderOutcome};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-folder results of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(mut self, folder: PathBuf, result: Result<FolderOutcome>) -> Self {
        match result {
            Ok(FolderOutcome::Processed(_)) => self.processed.push(folder),
            Ok(FolderOutcome::Skipped { .. }) => self.skipped.push(folder),
            Err(e) => {
                tracing::error!(folder = %folder.display(), error = %e, "Failed to process folder");
                self.failed.push((folder, e));
            }
        }
        self
    }
}

/// Immediate sub-directories of `root`, sorted by name
pub fn list_building_folders(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| Error::io(root, e))?;

    let mut folders = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(root, e))?.path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();

    Ok(folders)
}

fn run_batch<F>(root: &Path, config: &PipelineConfig, job: F) -> Result<BatchSummary>
where
    F: Fn(&Path) -> Result<FolderOutcome> + Sync,
{
    let folders = list_building_folders(root)?;

    // num_threads(0) keeps rayon's default
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads.unwrap_or(0))
        .build()?;
    tracing::info!(
        root = %root.display(),
        folders = folders.len(),
        threads = pool.current_num_threads(),
        "Starting batch"
    );

    let results: Vec<_> = pool.install(|| {
        folders
            .into_par_iter()
            .map(|folder| {
                let result = job(&folder);
                (folder, result)
            })
            .collect()
    });

    let summary = results
        .into_iter()
        .fold(BatchSummary::default(), |summary, (folder, result)| {
            summary.record(folder, result)
        });

    tracing::info!(
        processed = summary.processed.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "Batch finished"
    );

    Ok(summary)
}

/// Extract the building structure of every folder under `root`
pub fn process_all_folders(root: &Path, config: &PipelineConfig) -> Result<BatchSummary> {
    run_batch(root, config, |folder| process_folder(folder, config))
}

/// Regenerate wireframes from the structure JSON of every folder under `root`
pub fn regenerate_all_folders(root: &Path, config: &PipelineConfig) -> Result<BatchSummary> {
    run_batch(root, config, |folder| regenerate_wireframes(folder, config))
}
