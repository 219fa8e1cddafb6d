//! Verifies the dashboard listing card, the My Listings page, and, when
//! the user has a listed vehicle, the owner controls on its detail page.

use carmarket_e2e::{checks, cli};

fn main() {
    std::process::exit(cli::run(checks::dashboard::check()));
}
