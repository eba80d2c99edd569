use serde::{Deserialize, Serialize};

/// One row of a folder's result table. `raw_text` is empty when the OCR
/// service recognized nothing in the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_path: String,
    pub raw_text: String,
}
