use std::path::Path;

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::AppError;
use crate::models::record::ImageRecord;
use crate::services::ocr_service::{self, TextRecognizer};

/// Records collected from one top-level folder, plus the number of images
/// whose extraction failed and was skipped.
#[derive(Debug)]
pub struct FolderCollection {
    pub records: Vec<ImageRecord>,
    pub failed: usize,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Walks one top-level folder: image files in its immediate subfolders, in
/// file-name order. Files directly under the folder and anything nested
/// deeper than one subfolder are ignored. A failing image is logged and
/// contributes no record; it never aborts the folder.
pub fn collect_folder(
    recognizer: &dyn TextRecognizer,
    folder: &Path,
) -> Result<FolderCollection, AppError> {
    if !folder.is_dir() {
        return Err(AppError::General(format!(
            "not a directory: {}",
            folder.display()
        )));
    }

    let mut records = Vec::new();
    let mut failed = 0usize;

    let walker = WalkDir::new(folder)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "unreadable entry, skipping");
                continue;
            }
        };

        // Subfolder contents only: depth 1 is the subfolders themselves.
        if entry.depth() != 2 || !entry.file_type().is_file() {
            continue;
        }
        if !ocr_service::is_image_candidate(entry.path()) {
            continue;
        }

        let image_path = entry.path().to_string_lossy().to_string();
        match ocr_service::extract_text(recognizer, entry.path()) {
            Ok(text) => records.push(ImageRecord {
                image_path,
                raw_text: text.unwrap_or_default(),
            }),
            Err(e) => {
                warn!(image = %image_path, error = %e, "text extraction failed, skipping image");
                failed += 1;
            }
        }
    }

    Ok(FolderCollection { records, failed })
}
