//! Readiness probing for the app under test
//!
//! The marketplace app is an external black box expected to be running
//! already; it is never spawned from here. Any HTTP response proves the
//! server is up (a 404 still means something is listening), so only
//! transport errors count as "not ready yet".

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{VerifyError, VerifyResult};

const PROBE_INTERVAL: Duration = Duration::from_millis(250);
const PROBE_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Wait until the app at `base_url` responds to HTTP requests
pub async fn wait_for_app(base_url: &str, timeout: Duration) -> VerifyResult<()> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_REQUEST_TIMEOUT)
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout {
        attempts += 1;

        match client.get(base_url).send().await {
            Ok(resp) => {
                info!("App is up at {} (status {})", base_url, resp.status());
                return Ok(());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for app at {}...", base_url);
                }
                // Connection refused is expected while the app is starting
                if !e.is_connect() {
                    warn!("Readiness probe error: {}", e);
                }
            }
        }

        sleep(PROBE_INTERVAL).await;
    }

    Err(VerifyError::AppUnreachable {
        url: base_url.to_string(),
        attempts,
    })
}
