use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tidal_amm::{ConstantProductPool, PoolIndex};
use tidal_types::{TokenId, TokenMetadata, TokenRegistry, U128};
use tracing::{info, warn};

use crate::market::{Balances, MarketSnapshot};
use crate::prices::PriceTable;

#[derive(Debug, Deserialize, Serialize)]
struct SnapshotJson {
    #[serde(default)]
    network_id: Option<String>,
    pools: Vec<PoolJson>,
    tokens: Vec<TokenJson>,
    #[serde(default)]
    balances: BTreeMap<TokenId, Vec<U128>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct PoolJson {
    index: PoolIndex,
    fee_bps: u32,
    tokens: BTreeMap<TokenId, U128>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TokenJson {
    id: TokenId,
    symbol: String,
    decimals: u8,
    #[serde(default)]
    price_usd: Option<Decimal>,
}

/// Load a market snapshot from a JSON file
pub fn load_snapshot(snapshot_path: &Path) -> Result<MarketSnapshot> {
    info!("Loading market snapshot from {:?}", snapshot_path);

    let json_content =
        fs::read_to_string(snapshot_path).context("Failed to read market snapshot file")?;

    parse_snapshot(&json_content)
}

/// Parse a market snapshot, skipping pools that cannot be quoted
pub fn parse_snapshot(json_content: &str) -> Result<MarketSnapshot> {
    let snapshot: SnapshotJson =
        serde_json::from_str(json_content).context("Failed to parse market snapshot JSON")?;

    info!(
        "Found {} pools and {} tokens in snapshot for {}",
        snapshot.pools.len(),
        snapshot.tokens.len(),
        snapshot.network_id.as_deref().unwrap_or("unknown network")
    );

    // Token metadata and reference prices
    let mut registry = TokenRegistry::default();
    let mut prices = PriceTable::new();

    for token_json in snapshot.tokens {
        if let Some(price_usd) = token_json.price_usd {
            if price_usd < Decimal::ZERO {
                warn!("Ignoring negative price {} for {}", price_usd, token_json.id);
            } else {
                prices.insert(token_json.id.clone(), token_json.decimals, price_usd);
            }
        }

        let metadata = TokenMetadata::new(token_json.id, token_json.symbol, token_json.decimals);
        if let Some(previous) = registry.insert(metadata) {
            warn!("Duplicate token {}, keeping the last entry", previous.id);
        }
    }

    // Pools in snapshot order; that order decides ties between pools
    let mut pools = Vec::with_capacity(snapshot.pools.len());
    let mut seen = HashSet::new();

    for pool_json in snapshot.pools {
        if !seen.insert(pool_json.index) {
            warn!("Skipping duplicate pool {}", pool_json.index);
            continue;
        }

        if let Some(unknown) = pool_json.tokens.keys().find(|token| !registry.contains(token)) {
            warn!("Skipping pool {} with unknown token {}", pool_json.index, unknown);
            continue;
        }

        let reserves = pool_json
            .tokens
            .into_iter()
            .map(|(token, balance)| (token, u128::from(balance)));

        match ConstantProductPool::new(pool_json.index, reserves, pool_json.fee_bps) {
            Ok(pool) => pools.push(pool),
            Err(e) => {
                warn!("Skipping pool {}: {}", pool_json.index, e);
            }
        }
    }

    let mut balances = Balances::new();
    for (token, sources) in snapshot.balances {
        for amount in sources {
            balances.add_source(token.clone(), amount.into());
        }
    }

    info!(
        "Successfully loaded {} pools, {} priced tokens",
        pools.len(),
        prices.len()
    );

    Ok(MarketSnapshot {
        pools,
        registry,
        prices,
        balances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tidal_amm::AmmPool;

    const SNAPSHOT: &str = r#"{
        "network_id": "mainnet",
        "pools": [
            { "index": 0, "fee_bps": 30, "tokens": { "wrap.near": "1000", "usdc.near": "1000" } },
            { "index": 1, "fee_bps": 30, "tokens": { "wrap.near": "10" } },
            { "index": 2, "fee_bps": 20000, "tokens": { "wrap.near": "10", "usdc.near": "10" } },
            { "index": 3, "fee_bps": 30, "tokens": { "wrap.near": "10", "ghost.near": "10" } },
            { "index": 0, "fee_bps": 30, "tokens": { "wrap.near": "5", "usdc.near": "5" } },
            { "index": 4, "fee_bps": 25, "tokens": { "wrap.near": 500, "usdc.near": "340282366920938463463374607431768211455" } }
        ],
        "tokens": [
            { "id": "wrap.near", "symbol": "wNEAR", "decimals": 24 },
            { "id": "usdc.near", "symbol": "USDC", "decimals": 6, "price_usd": "1.00" }
        ],
        "balances": {
            "wrap.near": ["700", "300"]
        }
    }"#;

    #[test]
    fn test_skips_invalid_pools() {
        let market = parse_snapshot(SNAPSHOT).unwrap();

        let indices: Vec<_> = market.pools.iter().map(|pool| pool.index()).collect();
        assert_eq!(indices, vec![PoolIndex(0), PoolIndex(4)]);
        assert_eq!(
            market.pools[1].reserve(&TokenId::from("usdc.near")),
            Some(u128::MAX)
        );
    }

    #[test]
    fn test_loads_tokens_prices_and_balances() {
        let market = parse_snapshot(SNAPSHOT).unwrap();

        assert_eq!(market.registry.len(), 2);
        assert_eq!(market.registry.decimals(&TokenId::from("wrap.near")).unwrap(), 24);
        assert_eq!(market.prices.price(&TokenId::from("usdc.near")), Some(dec!(1)));
        assert!(!market.prices.contains(&TokenId::from("wrap.near")));
        assert_eq!(market.balances.available(&TokenId::from("wrap.near")), 1_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let market = load_snapshot(file.path()).unwrap();
        assert_eq!(market.pools.len(), 2);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(parse_snapshot("{ \"pools\": [] ").is_err());
        assert!(load_snapshot(Path::new("/nonexistent/tidal/snapshot.json")).is_err());
    }
}
