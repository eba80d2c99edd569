#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Export error: {0}")]
    Export(String),
}
