use std::path::{Component, Path};

use crate::error::AppError;

const PROTECTED_ROOTS: &[&str] = &[
    "/Applications",
    "/bin",
    "/sbin",
    "/usr",
    "/System",
    "/Library",
    "/etc",
    "C:\\Windows",
    "C:\\Program Files",
    "C:\\Program Files (x86)",
];

pub fn validate_path(path: &str) -> Result<(), AppError> {
    if path.is_empty() {
        return Err(AppError::General("path is empty".to_string()));
    }

    for component in Path::new(path).components() {
        if matches!(component, Component::ParentDir) {
            return Err(AppError::General(
                "path traversal (.. component) not allowed".to_string(),
            ));
        }
    }

    Ok(())
}

fn normalize_for_match(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }
    normalized
}

pub fn is_protected_path(path: &str) -> bool {
    let normalized = normalize_for_match(path);
    if normalized == "/" {
        return true;
    }
    PROTECTED_ROOTS.iter().any(|root| {
        let root = normalize_for_match(root);
        let normalized = normalized.to_ascii_lowercase();
        let root = root.to_ascii_lowercase();
        normalized == root || normalized.starts_with(&format!("{root}/"))
    })
}

pub fn validate_not_protected(path: &str) -> Result<(), AppError> {
    if is_protected_path(path) {
        return Err(AppError::General(format!("path is protected: {path}")));
    }
    Ok(())
}
