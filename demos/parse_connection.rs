//! Decompose a PostgreSQL connection string.
//!
//! Pass a connection string as the first argument, or pass nothing to
//! provision a fresh claimable database and parse its connection string.
//!
//! Run with: cargo run --example parse_connection [connection-string]

use instagres::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connection_string = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            println!("No connection string given, provisioning one...");
            let db = instagres::create_claimable_database(DEFAULT_REFERRER, None).await?;
            println!("✓ Claim URL: {}", db.claim_url);
            println!();
            db.connection_string
        }
    };

    let conn = ParsedConnection::parse(&connection_string)?;
    println!("host:     {}", conn.host);
    println!("port:     {}", conn.port);
    println!("database: {}", conn.database);
    println!("user:     {}", conn.user);
    println!("password: {}", "*".repeat(conn.password.len()));
    println!("dsn:      {}", conn.dsn);
    if !conn.options.is_empty() {
        println!("options:");
        for (key, value) in &conn.options {
            println!("  {key} = {value}");
        }
    }

    Ok(())
}
