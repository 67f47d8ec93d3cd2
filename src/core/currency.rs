//! Display metadata for well-known currencies

use super::rates::normalize_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const KNOWN_CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo {
        code: "BAM",
        symbol: "KM",
        name: "Bosnian Mark",
    },
    CurrencyInfo {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    CurrencyInfo {
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    CurrencyInfo {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
    CurrencyInfo {
        code: "JPY",
        symbol: "¥",
        name: "Japanese Yen",
    },
    CurrencyInfo {
        code: "AUD",
        symbol: "A$",
        name: "Australian Dollar",
    },
    CurrencyInfo {
        code: "CAD",
        symbol: "C$",
        name: "Canadian Dollar",
    },
    CurrencyInfo {
        code: "CHF",
        symbol: "Fr",
        name: "Swiss Franc",
    },
    CurrencyInfo {
        code: "CNY",
        symbol: "CN¥",
        name: "Chinese Yuan",
    },
    CurrencyInfo {
        code: "NZD",
        symbol: "NZ$",
        name: "New Zealand Dollar",
    },
];

pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    let code = normalize_code(code);
    KNOWN_CURRENCIES.iter().find(|c| c.code == code)
}

/// Formats an amount with two decimals, prefixed by the currency symbol when known and
/// suffixed by the code otherwise.
pub fn format_amount(code: &str, amount: f64) -> String {
    match lookup(code) {
        Some(info) => format!("{}{amount:.2}", info.symbol),
        None => format!("{amount:.2} {}", normalize_code(code)),
    }
}
