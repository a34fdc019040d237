//! Token identity and decimal metadata
//!
//! The registry plays the role of the token metadata provider: quotes are
//! computed in base units and only the edges need to know how many decimals a
//! token carries.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::{PrecisionError, Result};

/// Opaque token identifier (an account id such as `wrap.near`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for TokenId {
    type Err = Infallible;

    fn from_str(id: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(id))
    }
}

impl Borrow<str> for TokenId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Display metadata for a single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub id: TokenId,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(id: impl Into<TokenId>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// Token metadata keyed by id
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<TokenId, TokenMetadata>,
}

impl TokenRegistry {
    /// Insert or replace metadata for a token
    pub fn insert(&mut self, metadata: TokenMetadata) -> Option<TokenMetadata> {
        self.tokens.insert(metadata.id.clone(), metadata)
    }

    pub fn get(&self, token: &TokenId) -> Option<&TokenMetadata> {
        self.tokens.get(token)
    }

    /// Decimal precision of `token`
    pub fn decimals(&self, token: &TokenId) -> Result<u8> {
        self.tokens
            .get(token)
            .map(|meta| meta.decimals)
            .ok_or_else(|| PrecisionError::UnknownToken {
                token: token.clone(),
            })
    }

    pub fn contains(&self, token: &TokenId) -> bool {
        self.tokens.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenMetadata> {
        self.tokens.values()
    }
}

impl FromIterator<TokenMetadata> for TokenRegistry {
    fn from_iter<I: IntoIterator<Item = TokenMetadata>>(iter: I) -> Self {
        let mut registry = Self::default();
        for metadata in iter {
            registry.insert(metadata);
        }
        registry
    }
}
