//! Error types for page verification

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("App not reachable at {url} after {attempts} attempts")]
    AppUnreachable { url: String, attempts: usize },

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Duplicate screenshot name in check '{check}': {name}")]
    DuplicateScreenshot { check: String, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type VerifyResult<T> = Result<T, VerifyError>;
