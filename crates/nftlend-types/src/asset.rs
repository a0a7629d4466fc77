//! Settlement assets
//!
//! The currency a loan is denominated in. Assets come in two incompatible
//! on-chain representations (token standards) which need different lending
//! functions and argument shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// On-chain token standard of a settlement asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStandard {
    /// Legacy coin standard; functions are generic over the coin type
    V1,
    /// Fungible-asset standard; no type argument needed
    V2,
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStandard::V1 => write!(f, "v1"),
            TokenStandard::V2 => write!(f, "v2"),
        }
    }
}

/// Metadata for one settlement asset known to the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// On-chain type (`0x1::aptos_coin::AptosCoin`) or metadata address
    pub asset_type: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    pub token_standard: TokenStandard,
}

fn default_decimals() -> u8 {
    8
}

impl AssetInfo {
    /// Collapse the metadata into the shape the action dispatch needs.
    pub fn settlement(&self) -> SettlementAsset {
        match self.token_standard {
            TokenStandard::V1 => SettlementAsset::V1 {
                asset_type: self.asset_type.clone(),
            },
            TokenStandard::V2 => SettlementAsset::V2,
        }
    }
}

/// Settlement asset resolved for action dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementAsset {
    V1 { asset_type: String },
    V2,
}

impl SettlementAsset {
    pub fn token_standard(&self) -> TokenStandard {
        match self {
            SettlementAsset::V1 { .. } => TokenStandard::V1,
            SettlementAsset::V2 => TokenStandard::V2,
        }
    }
}

//-----------------------------------------------------------------------------
// Asset Registry
//-----------------------------------------------------------------------------

/// Lookup of settlement assets by their on-chain type
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: BTreeMap<String, AssetInfo>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry; later entries replace earlier ones with the same type.
    pub fn from_assets(assets: impl IntoIterator<Item = AssetInfo>) -> Self {
        let mut registry = Self::new();
        for asset in assets {
            registry.insert(asset);
        }
        registry
    }

    pub fn insert(&mut self, asset: AssetInfo) -> Option<AssetInfo> {
        self.assets.insert(asset.asset_type.clone(), asset)
    }

    /// Resolve the metadata for a record's `coin` field.
    pub fn get_by_type(&self, asset_type: &str) -> Option<&AssetInfo> {
        self.assets.get(asset_type)
    }

    /// Symbol for display, empty when the asset is unknown.
    pub fn symbol_for(&self, asset_type: &str) -> &str {
        self.get_by_type(asset_type)
            .map(|asset| asset.symbol.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetInfo> {
        self.assets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin_a() -> AssetInfo {
        AssetInfo {
            asset_type: "0x1::coin::CoinA".to_string(),
            symbol: "CNA".to_string(),
            name: "Coin A".to_string(),
            decimals: 6,
            token_standard: TokenStandard::V1,
        }
    }

    #[test]
    fn test_settlement_variants() {
        assert_eq!(
            coin_a().settlement(),
            SettlementAsset::V1 {
                asset_type: "0x1::coin::CoinA".to_string()
            }
        );

        let fa = AssetInfo {
            token_standard: TokenStandard::V2,
            asset_type: "0xa".to_string(),
            ..coin_a()
        };
        assert_eq!(fa.settlement(), SettlementAsset::V2);
        assert_eq!(fa.settlement().token_standard(), TokenStandard::V2);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = AssetRegistry::from_assets(vec![coin_a()]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.symbol_for("0x1::coin::CoinA"), "CNA");
        assert_eq!(registry.symbol_for("0x1::coin::Unknown"), "");
        assert!(registry.get_by_type("0x1::coin::Unknown").is_none());
    }

    #[test]
    fn test_token_standard_wire_format() {
        let json = r#"{"asset_type":"0xa","symbol":"USDC","token_standard":"v2"}"#;
        let asset: AssetInfo = serde_json::from_str(json).unwrap();
        assert_eq!(asset.token_standard, TokenStandard::V2);
        assert_eq!(asset.decimals, 8);
        assert_eq!(asset.name, "");
    }
}
