//! Dashboard, My Listings, and owner-controls check
//!
//! Requires a logged-in session with the dashboard reachable. The
//! owner-controls tail only has data to work with when the user has at
//! least one listed vehicle, so it runs best-effort.

use crate::check::{BestEffortBranch, PageCheck};
use crate::checks::VEHICLE_LINK_SELECTOR;
use crate::locator::Locator;
use crate::step::{CheckStep, DEFAULT_STEP_TIMEOUT_MS};

pub fn check() -> PageCheck {
    PageCheck {
        name: "dashboard-and-listings".to_string(),
        description: "Recently Listed Cars card, My Listings page, and owner controls".to_string(),
        steps: vec![
            CheckStep::Navigate { url: "/dashboard".to_string() },
            CheckStep::ExpectVisible {
                locator: Locator::heading("Recently Listed Cars"),
                timeout_ms: 15_000,
            },
            CheckStep::ExpectVisible {
                locator: Locator::link("View All"),
                timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
            },
            CheckStep::ExpectAttribute {
                locator: Locator::link("View All"),
                attribute: "href".to_string(),
                value: "/dashboard/my-listings".to_string(),
            },
            CheckStep::Screenshot { name: "dashboard-view".to_string() },
            CheckStep::Click { locator: Locator::link("View All") },
            CheckStep::ExpectVisible {
                locator: Locator::heading("My Listings"),
                timeout_ms: 10_000,
            },
            CheckStep::ExpectUrl {
                pattern: ".*/dashboard/my-listings".to_string(),
                timeout_ms: 10_000,
            },
            CheckStep::Screenshot { name: "my-listings-page".to_string() },
        ],
        branch: Some(BestEffortBranch {
            name: "owner-controls".to_string(),
            probe: Locator::css(VEHICLE_LINK_SELECTOR),
            probe_timeout_ms: 5_000,
            steps: vec![
                CheckStep::FollowFirstHref {
                    locator: Locator::css(VEHICLE_LINK_SELECTOR),
                },
                CheckStep::ExpectUrl {
                    pattern: ".*/vehicle/.*".to_string(),
                    timeout_ms: 10_000,
                },
                CheckStep::ExpectVisible {
                    locator: Locator::button("Edit"),
                    timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
                },
                CheckStep::ExpectVisible {
                    locator: Locator::button("Delete"),
                    timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
                },
                CheckStep::ExpectVisible {
                    locator: Locator::button("Mark as Sold"),
                    timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
                },
                CheckStep::Screenshot {
                    name: "vehicle-details-owner-view".to_string(),
                },
            ],
        }),
    }
}
