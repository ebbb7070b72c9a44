//! Currency definitions.

use super::ids::CurrencyId;

/// Static definition of a currency.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyDef {
    pub id: CurrencyId,
    pub name: String,
    /// Short display symbol, e.g. `"g"` for gold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub symbol: String,
}
