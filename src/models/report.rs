use serde::{Deserialize, Serialize};

/// Outcome of one top-level folder. A failed folder carries an error message
/// and no output file; its source directory is left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderReport {
    pub folder: String,
    pub rows: usize,
    pub failed_images: usize,
    pub output_file: Option<String>,
    pub error: Option<String>,
}

impl FolderReport {
    pub fn failed(folder: String, error: String) -> Self {
        Self {
            folder,
            rows: 0,
            failed_images: 0,
            output_file: None,
            error: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub folders_processed: usize,
    pub folders_failed: usize,
    pub total_rows: usize,
    pub reports: Vec<FolderReport>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.folders_failed > 0
    }
}
