//! Steps of a page check

use crate::locator::Locator;

/// Default wait for visibility assertions that don't specify one
pub const DEFAULT_STEP_TIMEOUT_MS: u64 = 5_000;

/// A single action in a page check, executed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStep {
    /// Navigate to a URL relative to the base
    Navigate { url: String },

    /// Wait for an element to become visible
    ExpectVisible { locator: Locator, timeout_ms: u64 },

    /// Assert an attribute value byte-exactly
    ExpectAttribute {
        locator: Locator,
        attribute: String,
        value: String,
    },

    /// Click an element
    Click { locator: Locator },

    /// Wait for the page URL to match a pattern
    ExpectUrl { pattern: String, timeout_ms: u64 },

    /// Read the first match's `href` and navigate to it.
    /// A missing attribute is an explicit failure, not a skip.
    FollowFirstHref { locator: Locator },

    /// Capture a named screenshot
    Screenshot { name: String },
}

impl CheckStep {
    /// Short label used in logs and failure reports
    pub fn label(&self) -> String {
        match self {
            CheckStep::Navigate { url } => format!("navigate:{}", url),
            CheckStep::ExpectVisible { locator, .. } => format!("expect-visible:{}", locator),
            CheckStep::ExpectAttribute { locator, attribute, .. } => {
                format!("expect-attribute:{}:{}", attribute, locator)
            }
            CheckStep::Click { locator } => format!("click:{}", locator),
            CheckStep::ExpectUrl { pattern, .. } => format!("expect-url:{}", pattern),
            CheckStep::FollowFirstHref { locator } => format!("follow-href:{}", locator),
            CheckStep::Screenshot { name } => format!("screenshot:{}", name),
        }
    }
}
