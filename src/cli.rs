//! Shared command-line surface for the verification binaries
//!
//! Every flag is defaulted so a bare invocation reproduces the original
//! fixed-target behavior against `http://localhost:3000`.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::check::PageCheck;
use crate::config::{Browser, VerifyConfig};
use crate::error::VerifyResult;
use crate::runner::Verifier;

#[derive(Parser, Debug)]
#[command(about = "Page verification for the CarMarket web app")]
pub struct Args {
    /// Base URL of the running marketplace app
    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Directory for screenshots and reports
    #[arg(short, long, default_value = "verification")]
    pub output: PathBuf,

    /// Per-run subdirectory for isolated artifacts
    #[arg(long)]
    pub run_id: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    pub browser: String,

    /// Run in headless mode
    #[arg(long, default_value = "true")]
    pub headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    pub viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    pub viewport_height: u32,

    /// Seconds to wait for the app to accept requests
    #[arg(long, default_value = "30")]
    pub startup_timeout_secs: u64,

    /// Treat a best-effort branch that found data but failed as a run failure
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    pub fn into_config(self) -> VerifyConfig {
        let browser = match self.browser.as_str() {
            "firefox" => Browser::Firefox,
            "webkit" => Browser::Webkit,
            _ => Browser::Chromium,
        };

        VerifyConfig {
            base_url: self.base_url,
            output_dir: self.output,
            run_id: self.run_id,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            browser,
            headless: self.headless,
            startup_timeout: Duration::from_secs(self.startup_timeout_secs),
            strict: self.strict,
        }
    }
}

/// Full driver for a verification binary. Exit code 0 on success
/// (including a skipped branch), 1 on verification failure, 2 on a
/// harness error.
pub fn run(check: PageCheck) -> i32 {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();
    let config = args.into_config();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    match rt.block_on(run_check(config, check)) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    }
}

async fn run_check(config: VerifyConfig, check: PageCheck) -> VerifyResult<bool> {
    let verifier = Verifier::new(config)?;

    verifier.wait_for_app().await?;

    let report = verifier.run_check(&check).await?;
    verifier.write_report(&report)?;

    info!("Verification finished: {}", check.name);
    Ok(verifier.passed(&report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_original_targets() {
        let args = Args::parse_from(["verify"]);
        assert_eq!(args.base_url, "http://localhost:3000");
        assert_eq!(args.output, PathBuf::from("verification"));
        assert_eq!(args.browser, "chromium");
        assert!(args.headless);
        assert!(!args.strict);

        let config = args.into_config();
        assert_eq!(config.browser, Browser::Chromium);
        assert_eq!(config.startup_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_browser_flag_mapping() {
        let args = Args::parse_from(["verify", "--browser", "webkit"]);
        assert_eq!(args.into_config().browser, Browser::Webkit);

        // Unknown names fall back to chromium
        let args = Args::parse_from(["verify", "--browser", "netscape"]);
        assert_eq!(args.into_config().browser, Browser::Chromium);
    }

    #[test]
    fn test_run_id_isolates_output() {
        let args = Args::parse_from(["verify", "--run-id", "ci-123"]);
        let config = args.into_config();
        assert_eq!(config.screenshot_dir(), PathBuf::from("verification/ci-123"));
    }
}
