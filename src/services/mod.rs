pub mod export_service;
pub mod file_service;
pub mod ocr_service;
pub mod walker_service;
