use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainInfo {
    pub id: u64,
    pub name: &'static str,
    pub symbol: &'static str,
}
