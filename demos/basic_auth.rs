//! Basic authentication example.
//!
//! This example logs a cobrand and an end user in, lists the user's
//! linked site accounts, and saves the session tokens so a later run
//! could resume without logging in again.
//!
//! Run with: cargo run --example basic_auth

use yodlee_rs::models::TransactionSearch;
use yodlee_rs::{InitOptions, UserCredentials, YodleeClient};

#[tokio::main]
async fn main() -> yodlee_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Cobrand credentials come from YODLEE_COBRAND_USERNAME / YODLEE_COBRAND_PASSWORD
    let options = InitOptions::from_env()?;
    let username = std::env::var("YODLEE_USER_USERNAME")
        .expect("YODLEE_USER_USERNAME environment variable required");
    let password = std::env::var("YODLEE_USER_PASSWORD")
        .expect("YODLEE_USER_PASSWORD environment variable required");

    println!("Connecting to Yodlee {}...", options.environment());

    let client = YodleeClient::initialize(options).await?;
    println!("Cobrand authenticated!");

    let user = UserCredentials::new(username, password)?;
    client.login_user(&user).await?;
    println!("User authenticated!");

    let accounts = client.site_accounts().list(Some(&user)).await?;
    let count = accounts.as_array().map(|a| a.len()).unwrap_or(0);
    println!("\nFound {} site account(s)", count);

    let search = TransactionSearch::new().with_range(1, 10);
    let transactions = client.transactions().search(&search, Some(&user)).await?;
    println!("Transaction hits: {}", transactions["numberOfHits"]);

    if let Some(tokens) = client.session().snapshot().await {
        let saved = serde_json::to_string_pretty(&tokens)?;
        println!("\nSession tokens (store securely to resume):\n{}", saved);
    }

    println!("\nDone!");
    Ok(())
}
