//! Create a claimable Postgres database.
//!
//! Run with: cargo run --example create_database [referrer]

use std::time::Instant;

use instagres::DEFAULT_REFERRER;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let referrer = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_REFERRER.to_owned());

    println!("Creating claimable database (referrer: {referrer})...");
    let start = Instant::now();
    let db = instagres::create_claimable_database(&referrer, None).await?;
    println!("✓ Database created in {}ms", start.elapsed().as_millis());
    println!();
    println!("Connection string:");
    println!("  {}", db.connection_string);
    println!("Claim URL:");
    println!("  {}", db.claim_url);
    println!("Expires at:");
    println!("  {}", db.expires_at);
    println!();
    println!("Connect with psql or any Postgres client, and visit the claim");
    println!("URL to keep the database past its expiry.");

    Ok(())
}
