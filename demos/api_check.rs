//! Smoke test for backend connectivity and login.
//!
//! Usage: cargo run --example api_check [BASE_URL] [USERNAME] [PASSWORD]
//!
//! Default base URL: http://localhost:8080

use barista_desk::api::{self, ApiClient};
use barista_desk::config::ApiConfig;
use barista_desk::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let username = std::env::args().nth(2).unwrap_or_else(|| "admin".to_string());
    let password = std::env::args().nth(3).unwrap_or_default();

    println!("Testing API at {base_url}");
    println!("======================================");

    let mut client = ApiClient::new(&ApiConfig {
        base_url,
        timeout_secs: 10,
        retry_attempts: 1,
    });

    println!("\n[1] Logging in as {username}...");
    let token = api::auth::login(&client, &username, &password).await?;
    let session = Session::from_token(&token)?;
    println!("    Logged in. Role: {}", session.role);
    client.set_token(&token);

    println!("\n[2] Fetching notifications...");
    let notifications = api::notification::list(&client).await?;
    println!("    {} notification(s)", notifications.len());
    for notification in notifications.iter().take(5) {
        println!(
            "      [{}] {} ({})",
            if notification.read { "read" } else { "new " },
            notification.title,
            notification.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!("\n[3] Fetching assigned assessments...");
    let assessments = api::assessment::list_assigned(&client, &session.username).await?;
    println!("    {} assessment(s)", assessments.len());
    for assessment in &assessments {
        println!(
            "      {} | due {} | {} questions",
            assessment.template,
            assessment.deadline.format("%Y-%m-%d %H:%M"),
            assessment.questions.len()
        );
    }

    println!("\n[4] Fetching training materials...");
    let materials = api::training::list(&client).await?;
    println!("    {} material(s)", materials.len());

    println!("\n======================================");
    println!("Done!");

    Ok(())
}
