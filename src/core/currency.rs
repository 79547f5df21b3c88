//! Currency keys and conversion direction

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Label used for the local currency in results and history lines.
pub const LOCAL_CURRENCY: &str = "CLP";

/// The fixed set of indicators the converter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum CurrencyKey {
    Dolar,
    Euro,
    Utm,
    Uf,
    Bitcoin,
}

impl CurrencyKey {
    pub const ALL: [CurrencyKey; 5] = [
        CurrencyKey::Dolar,
        CurrencyKey::Euro,
        CurrencyKey::Utm,
        CurrencyKey::Uf,
        CurrencyKey::Bitcoin,
    ];

    /// Key as used in endpoint paths, e.g. `dolar`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyKey::Dolar => "dolar",
            CurrencyKey::Euro => "euro",
            CurrencyKey::Utm => "utm",
            CurrencyKey::Uf => "uf",
            CurrencyKey::Bitcoin => "bitcoin",
        }
    }

    /// Uppercased key used as a unit suffix, e.g. `DOLAR`.
    pub fn unit(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl Display for CurrencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown currency: {0} (expected one of dolar, euro, utm, uf, bitcoin)")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyKey {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local pesos into the selected currency: `amount / rate`.
    LocalToForeign,
    /// Selected currency into local pesos: `amount * rate`.
    ForeignToLocal,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::LocalToForeign => write!(f, "{LOCAL_CURRENCY} → moneda"),
            Direction::ForeignToLocal => write!(f, "moneda → {LOCAL_CURRENCY}"),
        }
    }
}
