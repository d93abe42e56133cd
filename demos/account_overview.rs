//! Print the account balance and every space with its figures.
//!
//! Reads `LEMON_MARKETS_ACCESS_TOKEN` (a `.env` file works too) and optionally
//! `LEMON_MARKETS_BASE_URL`. Set `RUST_LOG=lemon_markets_client=debug` to trace requests.

use lemon_markets_client::{Account, RestClient, State};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account = Account::try_from_env().ok_or("LEMON_MARKETS_ACCESS_TOKEN is not set")?;
    let mut builder = RestClient::builder();
    if let Ok(base_url) = std::env::var("LEMON_MARKETS_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let mut state = State::new(builder.build(), account);

    println!("Account balance: {:.2}", state.balance().await?);

    let mut spaces = state.spaces().await?.to_vec();
    for space in &mut spaces {
        let balance = space.balance().await?;
        let cash = space.cash_to_invest().await?;
        println!(
            "{:<24} {:<8} balance {:>10.2}  cash to invest {:>10.2}",
            space.name(),
            space.space_type(),
            balance,
            cash
        );
    }

    Ok(())
}
