//! Raise an alert, then list alerts by priority and by assignee.
//!
//! ```sh
//! ALERT_API_URL=http://localhost:3000/api RUST_LOG=debug cargo run --example raise_alert
//! ```

use issue_alert_client::{AlertClient, AlertFilter, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = AlertClient::from_config(&ClientConfig::from_env()?)?;

    let created = client
        .create_alert(
            "Database Connection Error",
            "Database connection timeout in production environment",
            Some("high"),
            None,
        )
        .await?;
    println!("Created alert: {created}");

    let high = client
        .list_alerts(&AlertFilter::new().with_priority("high"))
        .await?;
    println!("\nHigh priority alerts: {high}");

    let sarah = client
        .list_alerts(&AlertFilter::new().with_assignee("Sarah"))
        .await?;
    println!("\nSarah's alerts: {sarah}");

    Ok(())
}
