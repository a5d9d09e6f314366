//! Poll a live Plexamp instance
//!
//! A diagnostic utility to check what the front panel sees from Plexamp.
//! Run with: cargo run --bin poll_timeline -- --player-url http://localhost:32500 [--count 3]

use clap::Parser;
use r_plexpanel::plexamp::{PlayerApi, PlexampClient, TIMELINE_POLL_PATH};
use reqwest::Client;
use std::error::Error;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plexamp base URL
    #[arg(short, long, default_value = "http://localhost:32500")]
    player_url: String,

    /// Number of polls
    #[arg(short, long, default_value_t = 1)]
    count: u32,

    /// Seconds between polls
    #[arg(short, long, default_value_t = 5)]
    interval: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let url = format!("{}{}", args.player_url.trim_end_matches('/'), TIMELINE_POLL_PATH);

    println!("\n1. Raw poll response from {}", url);
    let raw = Client::builder().timeout(Duration::from_secs(2)).build()?;
    match raw.get(&url).send().await {
        Ok(response) => {
            println!("Status: {}", response.status());
            println!("{}", response.text().await?);
        }
        Err(e) => {
            println!("❌ Poll failed: {}", e);
            println!("  - Check that Plexamp is running on this device");
            println!("  - Verify the URL is correct: {}", args.player_url);
            return Ok(());
        }
    }

    println!("\n2. Music timeline as parsed by the panel");
    let client = PlexampClient::new(&args.player_url, Duration::from_secs(2));
    for i in 0..args.count {
        if i > 0 {
            tokio::time::sleep(Duration::from_secs(args.interval)).await;
        }
        match client.poll_timeline().await {
            Ok(Some(snapshot)) => println!("state: {:?}, volume: {:?}", snapshot.state, snapshot.volume),
            Ok(None) => println!("No music timeline in the response"),
            Err(e) => println!("❌ {}", e),
        }
    }

    Ok(())
}
