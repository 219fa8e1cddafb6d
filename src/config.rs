//! Verifier configuration

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a verification run
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Base URL of the running marketplace app
    pub base_url: String,

    /// Directory for screenshots and reports
    pub output_dir: PathBuf,

    /// Optional per-run subdirectory, isolating artifacts of parallel runs
    pub run_id: Option<String>,

    /// Viewport dimensions
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Browser type
    pub browser: Browser,

    /// Run the browser headless
    pub headless: bool,

    /// How long to wait for the app to accept requests
    pub startup_timeout: Duration,

    /// Treat a failed best-effort branch as a run failure
    pub strict: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            output_dir: PathBuf::from("verification"),
            run_id: None,
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
            startup_timeout: Duration::from_secs(30),
            strict: false,
        }
    }
}

impl VerifyConfig {
    /// Directory screenshots land in for this run
    pub fn screenshot_dir(&self) -> PathBuf {
        match &self.run_id {
            Some(id) => self.output_dir.join(id),
            None => self.output_dir.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}
