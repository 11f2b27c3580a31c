//! Exchange Rate CLI
//!
//! Command-line interface for the Exchange Rate API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use rates_client::RatesClient;

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange Rate API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Exchange Rate API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the rate for a pair (fetched from the provider if not stored)
    Get {
        /// Base currency code, e.g. USD
        base: String,
        /// Quote currency code, e.g. EUR
        quote: String,
    },
    /// Add or update the rate for a pair
    Set {
        /// Base currency code, e.g. USD
        base: String,
        /// Quote currency code, e.g. EUR
        quote: String,
        /// Bid price
        #[arg(long)]
        bid: Decimal,
        /// Ask price
        #[arg(long)]
        ask: Decimal,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }
        Commands::Get { base, quote } => {
            let rate = client.get_rate(&base, &quote).await?;
            println!("{}", serde_json::to_string_pretty(&rate)?);
        }
        Commands::Set {
            base,
            quote,
            bid,
            ask,
        } => {
            let rate = client.set_rate(&base, &quote, bid, ask).await?;
            println!("{}", serde_json::to_string_pretty(&rate)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["rates", "get", "USD", "EUR"]).unwrap();
        assert_eq!(cli.api_url, "http://localhost:3000");
        assert!(matches!(
            cli.command,
            Commands::Get { base, quote } if base == "USD" && quote == "EUR"
        ));
    }

    #[test]
    fn test_parse_set_decimals() {
        let cli = Cli::try_parse_from([
            "rates", "--api-url", "http://rates:8080", "set", "USD", "EUR", "--bid", "1.15",
            "--ask", "1.17",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://rates:8080");
        match cli.command {
            Commands::Set { bid, ask, .. } => {
                assert_eq!(bid, Decimal::from_str("1.15").unwrap());
                assert_eq!(ask, Decimal::from_str("1.17").unwrap());
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn test_set_requires_prices() {
        assert!(Cli::try_parse_from(["rates", "set", "USD", "EUR", "--bid", "1.1"]).is_err());
        assert!(Cli::try_parse_from(["rates", "set", "USD", "EUR", "--bid", "x", "--ask", "1"]).is_err());
    }
}
