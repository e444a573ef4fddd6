use serde::{Deserialize, Serialize};

use crate::{SchemeCode, Symbol, ValidationError};

const BUILTIN_FUNDS: &[(&str, &str)] = &[
    (
        "119551",
        "Aditya Birla Sun Life Banking & PSU Debt Fund  - DIRECT - IDCW",
    ),
    (
        "119062",
        "HDFC Hybrid Equity Fund - Growth Option - Direct Plan",
    ),
    (
        "120503",
        "Axis ELSS Tax Saver Fund - Direct Plan - Growth Option",
    ),
    (
        "120586",
        "ICICI Prudential Bluechip Fund - Direct Plan - Growth",
    ),
    (
        "120584",
        "ICICI Prudential Dynamic Bond Fund - Direct Plan -  Daily Dividend",
    ),
    (
        "120594",
        "ICICI Prudential Technology Fund - Direct Plan -  Growth",
    ),
    (
        "146774",
        "HDFC FMP 1127D March 2019 (1) - Quarterly IDCW Option - Direct Plan",
    ),
];

const BUILTIN_INDICES: &[(&str, &str)] = &[
    ("Nifty 50", "^NSEI"),
    ("Nifty Next 50", "^NSMIDCP"),
    ("Nifty Midcap 100", "NIFTY_MIDCAP_100.NS"),
    ("Nifty Bank", "^NSEBANK"),
    ("Nifty IT", "^CNXIT"),
];

/// Fund listing entry, serialized with the upstream catalog's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundEntry {
    #[serde(rename = "schemeCode")]
    pub scheme_code: SchemeCode,
    #[serde(rename = "schemeName")]
    pub scheme_name: String,
}

/// Index display name paired with its market-data ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub display_name: String,
    pub symbol: Symbol,
}

/// Read-only fund list and index lookup, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    funds: Vec<FundEntry>,
    indices: Vec<IndexEntry>,
}

impl Catalog {
    pub fn new(funds: Vec<FundEntry>, indices: Vec<IndexEntry>) -> Self {
        Self { funds, indices }
    }

    /// Catalog shipped with the application.
    pub fn builtin() -> Result<Self, ValidationError> {
        let funds = BUILTIN_FUNDS
            .iter()
            .map(|(code, name)| {
                Ok(FundEntry {
                    scheme_code: SchemeCode::parse(code)?,
                    scheme_name: (*name).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let indices = BUILTIN_INDICES
            .iter()
            .map(|(name, symbol)| {
                Ok(IndexEntry {
                    display_name: (*name).to_owned(),
                    symbol: Symbol::parse(symbol)?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Self::new(funds, indices))
    }

    pub fn funds(&self) -> &[FundEntry] {
        &self.funds
    }

    pub fn index_names(&self) -> Vec<&str> {
        self.indices
            .iter()
            .map(|entry| entry.display_name.as_str())
            .collect()
    }

    pub fn index(&self, display_name: &str) -> Option<&IndexEntry> {
        self.indices
            .iter()
            .find(|entry| entry.display_name == display_name)
    }

    /// Catalog name for `scheme`, or the scheme code itself when the fund is not listed.
    pub fn fund_name(&self, scheme: &SchemeCode) -> String {
        self.funds
            .iter()
            .find(|entry| &entry.scheme_code == scheme)
            .map(|entry| entry.scheme_name.clone())
            .unwrap_or_else(|| scheme.as_str().to_owned())
    }
}
