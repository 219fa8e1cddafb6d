//! Playwright script generation and execution
//!
//! Each check renders to one self-contained JavaScript program so the whole
//! sequence shares a single browser session (click navigation carries state
//! between steps). The program reports back over stdout with a single
//! machine-readable line, and closes the browser in `finally` on every exit
//! path.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::check::{BestEffortBranch, PageCheck};
use crate::config::{Browser, VerifyConfig};
use crate::error::{VerifyError, VerifyResult};
use crate::locator::Locator;
use crate::step::CheckStep;

/// Prefix of the one stdout line the generated program reports through
pub const RESULT_MARKER: &str = "CARMARKET_RESULT";

/// What the generated program reported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptOutcome {
    /// All required steps completed
    pub ok: bool,

    /// Error message of the failed required step, if any
    pub error: Option<String>,

    /// Label of the required step that failed, if any
    pub failed_step: Option<String>,

    /// Tagged result of the best-effort tail, when the check has one and
    /// the required steps got that far
    pub branch: Option<BranchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchResult {
    pub outcome: BranchOutcome,
    pub reason: Option<String>,
}

/// Outcome tag for a best-effort branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchOutcome {
    /// The tail ran to completion
    Verified,
    /// The probe found nothing to verify against (unseeded app)
    SkippedNoData,
    /// The probe matched but a tail step failed
    Failed,
}

/// Playwright driver: renders checks to scripts and runs them under node
pub struct Playwright {
    base_url: String,
    screenshot_dir: PathBuf,
    viewport_width: u32,
    viewport_height: u32,
    browser: Browser,
    headless: bool,
}

impl Playwright {
    pub fn new(config: &VerifyConfig) -> VerifyResult<Self> {
        Self::check_playwright_installed()?;

        // The script runs from a scratch dir; keep artifact paths anchored
        // to the invocation dir.
        let mut screenshot_dir = config.screenshot_dir();
        if !screenshot_dir.is_absolute() {
            screenshot_dir = std::env::current_dir()?.join(screenshot_dir);
        }
        std::fs::create_dir_all(&screenshot_dir)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            screenshot_dir,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> VerifyResult<()> {
        let output = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(VerifyError::PlaywrightNotFound),
        }
    }

    /// Absolute path a named screenshot will be written to
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{}.png", name))
    }

    /// Run a whole check in one browser session and parse its outcome
    pub async fn run_check(&self, check: &PageCheck) -> VerifyResult<ScriptOutcome> {
        let script = self.build_script(check);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("check.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .kill_on_drop(true)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_outcome(&stdout) {
            Some(outcome) => Ok(outcome),
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(VerifyError::Playwright(format!(
                    "script produced no outcome\nstdout: {}\nstderr: {}",
                    stdout, stderr
                )))
            }
        }
    }

    /// Render a check to a standalone Playwright program
    pub fn build_script(&self, check: &PageCheck) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = {base_url};
  const outcome = {{ ok: true, error: null, failed_step: null, branch: null }};
  let current = null;

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = self.viewport_width,
            height = self.viewport_height,
            base_url = js_quote(&self.base_url),
        ));

        for (i, step) in check.steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.label()));
            script.push_str(&format!("    current = {};\n", js_quote(&step.label())));
            script.push_str(&self.step_js(step, "    "));
        }

        if let Some(branch) = &check.branch {
            script.push_str(&self.branch_js(branch));
        }

        script.push_str(&format!(
            r#"  }} catch (error) {{
    outcome.ok = false;
    outcome.failed_step = current;
    outcome.error = error.message;
  }} finally {{
    await browser.close();
  }}

  console.log('{marker} ' + JSON.stringify(outcome));
  process.exitCode = outcome.ok ? 0 : 1;
}})();
"#,
            marker = RESULT_MARKER,
        ));

        script
    }

    fn branch_js(&self, branch: &BestEffortBranch) -> String {
        let mut js = String::new();

        js.push_str(&format!("\n    // Best-effort: {}\n", branch.name));
        js.push_str(&format!(
            "    const probe = {}.first();\n",
            locator_js(&branch.probe)
        ));
        js.push_str("    try {\n");
        js.push_str(&format!(
            "      await probe.waitFor({{ state: 'visible', timeout: {} }});\n",
            branch.probe_timeout_ms
        ));
        js.push_str("    } catch (err) {\n");
        js.push_str("      outcome.branch = { outcome: 'skipped_no_data', reason: err.message };\n");
        js.push_str("    }\n");
        js.push_str("    if (outcome.branch === null) {\n");
        js.push_str("      try {\n");
        for step in &branch.steps {
            js.push_str(&format!("        current = {};\n", js_quote(&step.label())));
            js.push_str(&self.step_js(step, "        "));
        }
        js.push_str("        outcome.branch = { outcome: 'verified', reason: null };\n");
        js.push_str("      } catch (err) {\n");
        js.push_str("        outcome.branch = { outcome: 'failed', reason: current + ': ' + err.message };\n");
        js.push_str("      }\n");
        js.push_str("    }\n");

        js
    }

    fn step_js(&self, step: &CheckStep, indent: &str) -> String {
        match step {
            CheckStep::Navigate { url } => {
                format!("{indent}await page.goto(baseUrl + {});\n", js_quote(url))
            }
            CheckStep::ExpectVisible { locator, timeout_ms } => format!(
                "{indent}await {}.waitFor({{ state: 'visible', timeout: {} }});\n",
                locator_js(locator),
                timeout_ms
            ),
            CheckStep::ExpectAttribute { locator, attribute, value } => {
                let attr = js_quote(attribute);
                let val = js_quote(value);
                format!(
                    "{indent}{{\n\
                     {indent}  const actual = await {loc}.getAttribute({attr});\n\
                     {indent}  if (actual !== {val}) {{\n\
                     {indent}    throw new Error('attribute ' + {attr} + ' is ' + JSON.stringify(actual) + ', expected ' + JSON.stringify({val}));\n\
                     {indent}  }}\n\
                     {indent}}}\n",
                    loc = locator_js(locator),
                )
            }
            CheckStep::Click { locator } => {
                format!("{indent}await {}.click();\n", locator_js(locator))
            }
            CheckStep::ExpectUrl { pattern, timeout_ms } => format!(
                "{indent}await page.waitForURL(new RegExp({}), {{ timeout: {} }});\n",
                js_quote(pattern),
                timeout_ms
            ),
            CheckStep::FollowFirstHref { locator } => format!(
                "{indent}{{\n\
                 {indent}  const link = {loc}.first();\n\
                 {indent}  const href = await link.getAttribute('href');\n\
                 {indent}  if (!href) {{\n\
                 {indent}    throw new Error('first match has no href attribute');\n\
                 {indent}  }}\n\
                 {indent}  await page.goto(baseUrl + href);\n\
                 {indent}}}\n",
                loc = locator_js(locator),
            ),
            CheckStep::Screenshot { name } => {
                let path = self.screenshot_path(name);
                format!(
                    "{indent}await page.screenshot({{ path: {} }});\n",
                    js_quote(&path.to_string_lossy())
                )
            }
        }
    }
}

/// Compile a locator to a Playwright locator expression
fn locator_js(locator: &Locator) -> String {
    match locator {
        Locator::Role { role, name } => format!(
            "page.getByRole({}, {{ name: {} }})",
            js_quote(role.as_str()),
            js_quote(name)
        ),
        Locator::Css { selector } => format!("page.locator({})", js_quote(selector)),
        Locator::Text { text } => format!("page.getByText({})", js_quote(text)),
    }
}

/// Quote a string as a single-quoted JS literal
fn js_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Extract the last reported outcome line from script stdout
fn parse_outcome(stdout: &str) -> Option<ScriptOutcome> {
    static RESULT_RE: OnceLock<Regex> = OnceLock::new();
    let re = RESULT_RE.get_or_init(|| {
        Regex::new(&format!(r"(?m)^{} (.+)$", RESULT_MARKER)).expect("result marker regex")
    });

    re.captures_iter(stdout)
        .filter_map(|caps| serde_json::from_str(caps.get(1)?.as_str()).ok())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn driver() -> Playwright {
        Playwright {
            base_url: "http://localhost:3000".to_string(),
            screenshot_dir: PathBuf::from("verification"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }

    fn sample_check() -> PageCheck {
        PageCheck {
            name: "sample".to_string(),
            description: String::new(),
            steps: vec![
                CheckStep::Navigate { url: "/dashboard".to_string() },
                CheckStep::ExpectVisible {
                    locator: Locator::heading("Recently Listed Cars"),
                    timeout_ms: 15_000,
                },
                CheckStep::ExpectAttribute {
                    locator: Locator::link("View All"),
                    attribute: "href".to_string(),
                    value: "/dashboard/my-listings".to_string(),
                },
                CheckStep::Screenshot { name: "dashboard-view".to_string() },
            ],
            branch: Some(BestEffortBranch {
                name: "owner-controls".to_string(),
                probe: Locator::css("a[href^='/vehicle/']"),
                probe_timeout_ms: 5_000,
                steps: vec![CheckStep::FollowFirstHref {
                    locator: Locator::css("a[href^='/vehicle/']"),
                }],
            }),
        }
    }

    #[test_case("plain", "'plain'")]
    #[test_case("it's", "'it\\'s'")]
    #[test_case("a\\b", "'a\\\\b'")]
    #[test_case("two\nlines", "'two\\nlines'")]
    fn test_js_quote(input: &str, expected: &str) {
        assert_eq!(js_quote(input), expected);
    }

    #[test]
    fn test_locator_js() {
        assert_eq!(
            locator_js(&Locator::heading("My Listings")),
            "page.getByRole('heading', { name: 'My Listings' })"
        );
        assert_eq!(
            locator_js(&Locator::css("a[href^='/vehicle/']")),
            "page.locator('a[href^=\\'/vehicle/\\']')"
        );
        assert_eq!(
            locator_js(&Locator::text("Seller Information")),
            "page.getByText('Seller Information')"
        );
    }

    #[test]
    fn test_build_script_shape() {
        let script = driver().build_script(&sample_check());

        assert!(script.contains("require('playwright')"));
        assert!(script.contains("chromium.launch({ headless: true })"));
        assert!(script.contains("viewport: { width: 1280, height: 720 }"));
        assert!(script.contains("const baseUrl = 'http://localhost:3000';"));
        assert!(script.contains("await page.goto(baseUrl + '/dashboard');"));
        assert!(script.contains(
            "page.getByRole('heading', { name: 'Recently Listed Cars' })\
             .waitFor({ state: 'visible', timeout: 15000 });"
        ));
        // close is unconditional
        assert!(script.contains("} finally {"));
        assert!(script.contains("await browser.close();"));
        assert!(script.contains("CARMARKET_RESULT"));
    }

    #[test]
    fn test_attribute_assertion_is_exact() {
        let script = driver().build_script(&sample_check());
        assert!(script.contains("const actual = await page.getByRole('link', { name: 'View All' }).getAttribute('href');"));
        assert!(script.contains("if (actual !== '/dashboard/my-listings') {"));
    }

    #[test]
    fn test_screenshot_path_under_output_dir() {
        let script = driver().build_script(&sample_check());
        assert!(script.contains("await page.screenshot({ path: 'verification/dashboard-view.png' });"));
    }

    #[test]
    fn test_branch_probe_and_tags() {
        let script = driver().build_script(&sample_check());
        assert!(script.contains("const probe = page.locator('a[href^=\\'/vehicle/\\']').first();"));
        assert!(script.contains("await probe.waitFor({ state: 'visible', timeout: 5000 });"));
        assert!(script.contains("outcome.branch = { outcome: 'skipped_no_data', reason: err.message };"));
        assert!(script.contains("outcome.branch = { outcome: 'verified', reason: null };"));
        assert!(script.contains("outcome.branch = { outcome: 'failed', reason: current + ': ' + err.message };"));
    }

    #[test]
    fn test_follow_href_fails_on_missing_attribute() {
        let script = driver().build_script(&sample_check());
        assert!(script.contains("const href = await link.getAttribute('href');"));
        assert!(script.contains("if (!href) {"));
    }

    #[test]
    fn test_parse_outcome_ok() {
        let stdout = "noise\nCARMARKET_RESULT {\"ok\":true,\"error\":null,\"failed_step\":null,\"branch\":null}\n";
        let outcome = parse_outcome(stdout).unwrap();
        assert!(outcome.ok);
        assert!(outcome.branch.is_none());
    }

    #[test]
    fn test_parse_outcome_with_branch() {
        let stdout = "CARMARKET_RESULT {\"ok\":true,\"error\":null,\"failed_step\":null,\
                      \"branch\":{\"outcome\":\"skipped_no_data\",\"reason\":\"timeout\"}}";
        let outcome = parse_outcome(stdout).unwrap();
        let branch = outcome.branch.unwrap();
        assert_eq!(branch.outcome, BranchOutcome::SkippedNoData);
        assert_eq!(branch.reason.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_parse_outcome_takes_last_line() {
        let stdout = "CARMARKET_RESULT {\"ok\":true,\"error\":null,\"failed_step\":null,\"branch\":null}\n\
                      CARMARKET_RESULT {\"ok\":false,\"error\":\"boom\",\"failed_step\":\"navigate:/\",\"branch\":null}\n";
        let outcome = parse_outcome(stdout).unwrap();
        assert!(!outcome.ok);
        assert_eq!(outcome.failed_step.as_deref(), Some("navigate:/"));
    }

    #[test]
    fn test_parse_outcome_rejects_garbage() {
        assert!(parse_outcome("no marker here").is_none());
        assert!(parse_outcome("CARMARKET_RESULT not json").is_none());
    }
}
