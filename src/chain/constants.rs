use crate::entity::{ChainInfo, TokenInfo};

// Known token information
pub const SUPPORTED_TOKENS: &[TokenInfo] = &[
    TokenInfo {
        symbol: "ETH",
        name: "Ethereum",
        address: "0x0000000000000000000000000000000000000000",
        decimals: 18,
    },
    TokenInfo {
        symbol: "USDC",
        name: "USD Coin",
        address: "0xA0b86a33E6441b8435b662f0E2d0B8A0E4B2B8B0",
        decimals: 6,
    },
    TokenInfo {
        symbol: "WETH",
        name: "Wrapped Ethereum",
        address: "0x4200000000000000000000000000000000000006",
        decimals: 18,
    },
];

pub const SUPPORTED_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        id: 8453,
        name: "Base",
        symbol: "BASE",
    },
    ChainInfo {
        id: 1,
        name: "Ethereum",
        symbol: "ETH",
    },
    ChainInfo {
        id: 137,
        name: "Polygon",
        symbol: "MATIC",
    },
];

// Batch limits
pub const MAX_RECIPIENTS_PER_BATCH: usize = 50;

// Slippage bounds, in percent
pub const DEFAULT_SLIPPAGE: f64 = 0.5;
pub const MIN_SLIPPAGE: f64 = 0.1;
pub const MAX_SLIPPAGE: f64 = 50.0;

pub fn find_token(symbol: &str) -> Option<&'static TokenInfo> {
    SUPPORTED_TOKENS.iter().find(|t| t.symbol == symbol)
}

pub fn find_chain(name: &str) -> Option<&'static ChainInfo> {
    SUPPORTED_CHAINS.iter().find(|c| c.name == name)
}
