use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ERROR_DETAIL_CHARS: usize = 200;

pub fn is_image_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// One recognized text block, ordered as the service returned them. The first
/// annotation carries the full recognized text of the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub description: String,
}

/// Seam between the pipeline and the network. The production implementation
/// is [`VisionClient`]; tests substitute stubs.
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextAnnotation>, AppError>;
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageResponse {
    #[serde(default, rename = "textAnnotations")]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

fn annotate_body(image: &[u8]) -> AnnotateRequest {
    AnnotateRequest {
        requests: vec![ImageRequest {
            image: ImageContent {
                content: BASE64.encode(image),
            },
            features: vec![Feature {
                feature_type: "TEXT_DETECTION".to_string(),
            }],
        }],
    }
}

fn truncate_detail(detail: &str) -> String {
    detail.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
}

pub struct VisionClient {
    http: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

impl VisionClient {
    pub fn new(api_key: String, endpoint: String) -> Result<Self, AppError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Http(format!("client init failed: {e}")))?;
        Ok(Self {
            http,
            api_key,
            endpoint,
        })
    }

    fn annotate_url(&self) -> String {
        format!(
            "{}/v1/images:annotate?key={}",
            self.endpoint.trim_end_matches('/'),
            self.api_key
        )
    }
}

impl TextRecognizer for VisionClient {
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextAnnotation>, AppError> {
        let response = self
            .http
            .post(self.annotate_url())
            .json(&annotate_body(image))
            .send()
            .map_err(|e| AppError::Http(format!("annotate request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AppError::Http(format!(
                "annotate returned {status}: {}",
                truncate_detail(&detail)
            )));
        }

        let parsed: AnnotateResponse = response
            .json()
            .map_err(|e| AppError::Ocr(format!("malformed annotate response: {e}")))?;
        let first = parsed.responses.into_iter().next().unwrap_or_default();
        if let Some(error) = first.error {
            return Err(AppError::Ocr(format!(
                "service error {}: {}",
                error.code, error.message
            )));
        }
        Ok(first.text_annotations)
    }
}

/// Reads the image and returns the first recognized text block, or `None`
/// when the service reports no annotations. I/O and service failures surface
/// as recoverable errors for the caller to log and skip.
pub fn extract_text(
    recognizer: &dyn TextRecognizer,
    image_path: &Path,
) -> Result<Option<String>, AppError> {
    let bytes = std::fs::read(image_path)?;
    let annotations = recognizer.recognize(&bytes)?;
    Ok(annotations.into_iter().next().map(|a| a.description))
}
