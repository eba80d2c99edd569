use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::config::RunConfig;
use crate::dedup;
use crate::error::AppError;
use crate::models::report::{FolderReport, RunSummary};
use crate::services::ocr_service::TextRecognizer;
use crate::services::{export_service, file_service, walker_service};

const OUTPUT_SUFFIX: &str = "_raw_text_extracted.xlsx";

pub fn output_file_name(folder_name: &str) -> String {
    format!("{folder_name}{OUTPUT_SUFFIX}")
}

/// Runs one top-level folder through collect → dedup → export → cleanup.
/// The source folder is deleted only after the export write has completed,
/// so a failed export leaves the folder on disk.
pub fn process_folder(
    recognizer: &dyn TextRecognizer,
    folder: &Path,
    output_dir: &Path,
) -> Result<FolderReport, AppError> {
    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::General(format!("invalid folder path: {}", folder.display())))?;

    let collection = walker_service::collect_folder(recognizer, folder)?;
    let records = dedup::dedup_records(collection.records);

    let output_file = output_dir.join(output_file_name(&folder_name));
    export_service::write_table(&records, &output_file)?;

    file_service::remove_folder(folder)?;

    Ok(FolderReport {
        folder: folder_name,
        rows: records.len(),
        failed_images: collection.failed,
        output_file: Some(output_file.to_string_lossy().to_string()),
        error: None,
    })
}

fn top_level_folders(data_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        // Non-directory entries at the top level are skipped silently.
        if entry.file_type()?.is_dir() {
            folders.push(entry.path());
        }
    }
    folders.sort();
    Ok(folders)
}

fn progress_bar(quiet: bool, len: u64) -> ProgressBar {
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(len)
    };
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Processes every top-level folder under the data root in name order. A
/// failing folder is logged, recorded in the summary, left undeleted and
/// unexported; the run continues with the next folder.
pub fn run(config: &RunConfig, recognizer: &dyn TextRecognizer) -> Result<RunSummary, AppError> {
    let started_at = Utc::now().to_rfc3339();
    let folders = top_level_folders(&config.data_dir)?;

    let bar = progress_bar(config.quiet, folders.len() as u64);
    let mut reports = Vec::with_capacity(folders.len());

    for folder in &folders {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| folder.display().to_string());
        bar.set_message(name.clone());

        match process_folder(recognizer, folder, &config.output_dir) {
            Ok(report) => {
                info!(
                    folder = %name,
                    rows = report.rows,
                    failed_images = report.failed_images,
                    "folder exported"
                );
                reports.push(report);
            }
            Err(e) => {
                error!(folder = %name, error = %e, "folder processing failed");
                reports.push(FolderReport::failed(name, e.to_string()));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let folders_failed = reports.iter().filter(|r| r.is_failure()).count();
    Ok(RunSummary {
        started_at,
        finished_at: Utc::now().to_rfc3339(),
        folders_processed: reports.len() - folders_failed,
        folders_failed,
        total_rows: reports.iter().map(|r| r.rows).sum(),
        reports,
    })
}
