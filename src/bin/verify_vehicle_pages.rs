//! Verifies the search and vehicle not-found states, and, when any
//! listing exists, the seller panel on a vehicle detail page.

use carmarket_e2e::{checks, cli};

fn main() {
    std::process::exit(cli::run(checks::pages::check()));
}
