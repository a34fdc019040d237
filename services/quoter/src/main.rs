//! Swap quote CLI entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tidal_config::{load_config, QuoterConfig};
use tidal_quoter::{load_snapshot, MarketSnapshot, SwapQuoter, SwapRequest};
use tidal_types::precision::{from_base_units, round_display};
use tidal_types::TokenId;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment overlay (config/environments/<name>.toml)
    #[arg(short, long)]
    environment: Option<String>,

    /// Market snapshot path, overrides the configured one
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote spending an exact input amount
    Quote {
        #[command(flatten)]
        pair: PairArgs,

        /// Input amount in whole tokens
        amount: Decimal,
    },
    /// Quote the input needed for a desired output amount
    Inverse {
        #[command(flatten)]
        pair: PairArgs,

        /// Desired output in whole tokens
        amount: Decimal,
    },
    /// Quote spending the whole available balance
    Max {
        #[command(flatten)]
        pair: PairArgs,
    },
    /// List tradable tokens with prices and balances
    Tokens,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args, Debug)]
struct PairArgs {
    /// Input token, defaults to the configured input token
    #[arg(long)]
    from: Option<TokenId>,

    /// Output token, defaults to the configured output token
    #[arg(long)]
    to: Option<TokenId>,
}

impl PairArgs {
    fn resolve(self, config: &QuoterConfig) -> (TokenId, TokenId) {
        (
            self.from
                .unwrap_or_else(|| config.network.default_input_token.clone()),
            self.to
                .unwrap_or_else(|| config.network.default_output_token.clone()),
        )
    }
}

#[derive(Debug, Serialize)]
struct TokenListing {
    id: TokenId,
    symbol: Option<String>,
    decimals: Option<u8>,
    price_usd: Option<Decimal>,
    available: Option<Decimal>,
}

fn list_tokens(market: &MarketSnapshot, config: &QuoterConfig) -> Vec<TokenListing> {
    market
        .tradable_tokens(&config.network.wrap_near_token)
        .into_iter()
        .map(|id| {
            let metadata = market.registry.get(&id);
            let available = metadata.and_then(|meta| {
                from_base_units(market.balances.available(&id), meta.decimals)
                    .ok()
                    .map(|human| round_display(human, config.display.decimal_places))
            });
            TokenListing {
                symbol: metadata.map(|meta| meta.symbol.clone()),
                decimals: metadata.map(|meta| meta.decimals),
                price_usd: market.prices.price(&id),
                available,
                id,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidal_quoter=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    info!("Starting Tidal quoter");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.as_deref(), args.environment.as_deref())
        .context("Failed to load quoter configuration")?;
    if let Some(snapshot) = args.snapshot {
        config.snapshot.path = snapshot;
    }
    info!("Network: {}", config.network.network_id);

    let load_market = || {
        load_snapshot(&config.snapshot.path)
            .with_context(|| format!("Failed to load snapshot {:?}", config.snapshot.path))
    };

    let output = match args.command {
        Command::Quote { pair, amount } => {
            let market = load_market()?;
            let (in_token, out_token) = pair.resolve(&config);
            let outcome = SwapQuoter::new(&market, &config).quote(
                &in_token,
                &out_token,
                SwapRequest::ExactInput(amount),
            )?;
            serde_json::to_string_pretty(&outcome)?
        }
        Command::Inverse { pair, amount } => {
            let market = load_market()?;
            let (in_token, out_token) = pair.resolve(&config);
            let outcome = SwapQuoter::new(&market, &config).quote(
                &in_token,
                &out_token,
                SwapRequest::ExactOutput(amount),
            )?;
            serde_json::to_string_pretty(&outcome)?
        }
        Command::Max { pair } => {
            let market = load_market()?;
            let (in_token, out_token) = pair.resolve(&config);
            let outcome = SwapQuoter::new(&market, &config).max_swap(&in_token, &out_token)?;
            serde_json::to_string_pretty(&outcome)?
        }
        Command::Tokens => {
            let market = load_market()?;
            serde_json::to_string_pretty(&list_tokens(&market, &config))?
        }
        Command::Config => config.to_toml_string()?,
    };

    println!("{}", output);
    Ok(())
}
