use std::collections::HashSet;
use std::path::Path;

use crate::models::record::ImageRecord;

/// Dedup key: the file name, case-folded. Subfolders hold scans of the same
/// card lot, so `s1/card.png` and `s2/CARD.PNG` are the same card; the first
/// one walked wins.
fn dedup_key(image_path: &str) -> String {
    Path::new(image_path)
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| image_path.to_lowercase())
}

/// Returns a new table retaining only the first record per distinct image,
/// preserving the original relative order.
pub fn dedup_records(records: Vec<ImageRecord>) -> Vec<ImageRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(dedup_key(&record.image_path)))
        .collect()
}
