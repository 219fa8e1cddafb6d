//! CarMarket page verification harness
//!
//! Drives a headless browser (Playwright, run under node) against a locally
//! running instance of the CarMarket web app and visually confirms that
//! specific pages render their expected elements, saving screenshots as
//! evidence. Missing seed data is tolerated through explicitly tagged
//! best-effort branches instead of swallowed exceptions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Verification binary (Rust)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Verifier                                                   │
//! │    ├── wait_for_app()      -> readiness probe               │
//! │    ├── run_check(check)    -> CheckReport                   │
//! │    └── write_report()      -> <name>.results.json           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PageCheck                                                  │
//! │    ├── steps: [CheckStep]                                   │
//! │    │     ├── navigate { url }                               │
//! │    │     ├── expect_visible { locator, timeout }            │
//! │    │     ├── expect_attribute { locator, attr, value }      │
//! │    │     ├── click { locator }                              │
//! │    │     ├── expect_url { pattern, timeout }                │
//! │    │     ├── follow_first_href { locator }                  │
//! │    │     └── screenshot { name }                            │
//! │    └── branch: BestEffortBranch                             │
//! │          probe found nothing  -> SkippedNoData              │
//! │          tail step failed     -> Failed(reason)             │
//! │          tail completed       -> Verified                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Playwright                                                 │
//! │    one check -> one generated JS program -> one node run    │
//! │    outcome parsed from a single marker line on stdout       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod check;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod runner;
pub mod script;
pub mod server;
pub mod step;

pub use check::{BestEffortBranch, PageCheck};
pub use config::{Browser, VerifyConfig};
pub use error::{VerifyError, VerifyResult};
pub use locator::Locator;
pub use runner::{CheckReport, Verifier};
pub use script::BranchOutcome;
pub use step::CheckStep;
