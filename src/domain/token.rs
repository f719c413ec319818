use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Token address cannot be empty")]
    EmptyAddress,
    #[error("Token symbol cannot be empty")]
    EmptySymbol,
    #[error("Token registry must contain at least one token")]
    EmptyRegistry,
    #[error("Duplicate token symbol: {0}")]
    DuplicateSymbol(String),
}

/// On-chain address of a tradable token (a mint address on Solana)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn new(address: impl Into<String>) -> Result<Self, TokenError> {
        let address = address.into().trim().to_string();
        if address.is_empty() {
            return Err(TokenError::EmptyAddress);
        }
        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TokenAddress {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TokenAddress> for String {
    fn from(address: TokenAddress) -> Self {
        address.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token the bot knows by symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownToken {
    pub symbol: String,
    pub address: TokenAddress,
}

impl KnownToken {
    pub fn new(symbol: impl Into<String>, address: TokenAddress) -> Result<Self, TokenError> {
        let symbol = symbol.into().trim().to_string();
        if symbol.is_empty() {
            return Err(TokenError::EmptySymbol);
        }
        Ok(Self { symbol, address })
    }
}

/// Result of resolving a rotation entry against the registry
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Known(&'a KnownToken),
    /// Entry was not in the registry, the default token is used instead
    Fallback(&'a KnownToken),
}

impl<'a> Resolved<'a> {
    pub fn token(&self) -> &'a KnownToken {
        match self {
            Resolved::Known(token) | Resolved::Fallback(token) => token,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }
}

/// Ordered set of known tokens. The first entry is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRegistry {
    tokens: Vec<KnownToken>,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<KnownToken>) -> Result<Self, TokenError> {
        if tokens.is_empty() {
            return Err(TokenError::EmptyRegistry);
        }
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i]
                .iter()
                .any(|other| other.symbol.eq_ignore_ascii_case(&token.symbol))
            {
                return Err(TokenError::DuplicateSymbol(token.symbol.clone()));
            }
        }
        Ok(Self { tokens })
    }

    /// Case-insensitive lookup by symbol
    pub fn get(&self, symbol: &str) -> Option<&KnownToken> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol.trim()))
    }

    pub fn default_token(&self) -> &KnownToken {
        // Non-empty by construction
        &self.tokens[0]
    }

    /// Resolve a symbol, falling back to the default token when unknown
    pub fn resolve(&self, symbol: &str) -> Resolved<'_> {
        match self.get(symbol) {
            Some(token) => Resolved::Known(token),
            None => Resolved::Fallback(self.default_token()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnownToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
