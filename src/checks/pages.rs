//! Empty-state and vehicle-detail check
//!
//! The not-found states hold for any database contents: the query string
//! and vehicle id are chosen to never match a real listing. The detail
//! success path needs at least one listing, so it runs best-effort.

use crate::check::{BestEffortBranch, PageCheck};
use crate::checks::VEHICLE_LINK_SELECTOR;
use crate::locator::Locator;
use crate::step::CheckStep;

pub fn check() -> PageCheck {
    PageCheck {
        name: "vehicle-pages".to_string(),
        description: "Search and vehicle not-found states, seller panel on a real listing"
            .to_string(),
        steps: vec![
            CheckStep::Navigate {
                url: "/results?query=nonexistentvehicle123".to_string(),
            },
            CheckStep::ExpectVisible {
                locator: Locator::heading("No Vehicles Found"),
                timeout_ms: 15_000,
            },
            CheckStep::Screenshot { name: "no-search-results".to_string() },
            CheckStep::Navigate {
                url: "/vehicle/nonexistentvehicle123".to_string(),
            },
            CheckStep::ExpectVisible {
                locator: Locator::heading("Vehicle Not Found"),
                timeout_ms: 15_000,
            },
            CheckStep::Screenshot { name: "vehicle-not-found".to_string() },
            // Position on the listing grid for the probe below
            CheckStep::Navigate { url: "/results".to_string() },
        ],
        branch: Some(BestEffortBranch {
            name: "vehicle-details".to_string(),
            probe: Locator::css(VEHICLE_LINK_SELECTOR),
            probe_timeout_ms: 5_000,
            steps: vec![
                CheckStep::FollowFirstHref {
                    locator: Locator::css(VEHICLE_LINK_SELECTOR),
                },
                CheckStep::ExpectVisible {
                    locator: Locator::text("Seller Information"),
                    timeout_ms: 15_000,
                },
                CheckStep::ExpectVisible {
                    locator: Locator::button("Contact Seller"),
                    timeout_ms: 15_000,
                },
                CheckStep::Screenshot {
                    name: "vehicle-details-success".to_string(),
                },
            ],
        }),
    }
}
