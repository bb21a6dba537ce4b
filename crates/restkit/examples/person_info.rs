//! Fetch a person record and print it
//!
//! ```sh
//! PERSON_URL=https://www.someservice.com/person cargo run --example person_info
//! ```

use restkit::{get_with, Request, Url};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PersonInfo {
    name: String,
    address: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let target = std::env::var("PERSON_URL")
        .unwrap_or_else(|_| "https://www.someservice.com/person".to_string());
    let url = Url::parse(&target)?;
    tracing::debug!("Using person URL: {}", url);

    let mut response = get_with(url, |request| {
        request.header("X-Client", "restkit");
    })
    .respond_as::<PersonInfo>()
    .await?;

    println!("Status: {}", response.code());
    let person = response.body().await?;
    println!("{} lives in {}", person.name, person.address);

    Ok(())
}
