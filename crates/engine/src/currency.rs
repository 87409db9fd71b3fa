use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{EngineError, ResultEngine};

/// Currency codes the converter knows about.
///
/// The set is closed: anything else is rejected with
/// [`EngineError::UnsupportedCurrency`] (unknown source) or
/// [`EngineError::UnsupportedConversion`] (unknown target).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Thb,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Thb, Currency::Eur];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Thb => "THB",
            Currency::Eur => "EUR",
        }
    }

    /// Exchange rate applied when converting `self` into `to`.
    ///
    /// The table is mock data: rates are not reciprocal, so converting
    /// USD→THB→USD does not give back the starting amount.
    #[must_use]
    pub const fn rate_to(self, to: Currency) -> f64 {
        match (self, to) {
            (Currency::Usd, Currency::Thb) => 36.50,
            (Currency::Usd, Currency::Eur) => 0.92,
            (Currency::Thb, Currency::Usd) => 0.0274,
            (Currency::Thb, Currency::Eur) => 0.0252,
            (Currency::Eur, Currency::Usd) => 1.08,
            (Currency::Eur, Currency::Thb) => 39.67,
            (Currency::Usd, Currency::Usd)
            | (Currency::Thb, Currency::Thb)
            | (Currency::Eur, Currency::Eur) => 1.0,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    /// Codes are matched exactly: `usd` is not `USD`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == value)
            .ok_or_else(|| EngineError::UnsupportedCurrency(value.to_string()))
    }
}

/// Outcome of converting a single amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub currency: Currency,
    pub original_amount: f64,
    pub original_currency: Currency,
}

/// Rounds to two decimals, halves away from zero.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn resolve_pair(from: &str, to: &str) -> ResultEngine<(Currency, Currency)> {
    let source = Currency::try_from(from)?;
    let target = Currency::try_from(to).map_err(|_| EngineError::UnsupportedConversion {
        from: from.to_string(),
        to: to.to_string(),
    })?;
    Ok((source, target))
}

/// Converts `amount` from `from` to `to` using the fixed rate table.
pub fn convert_amount(from: &str, to: &str, amount: f64) -> ResultEngine<Conversion> {
    let (source, target) = resolve_pair(from, to)?;
    let converted = round_cents(amount * source.rate_to(target));
    if !converted.is_finite() {
        return Err(EngineError::InvalidInput(
            "converted amount is out of range".to_string(),
        ));
    }
    Ok(Conversion {
        amount: converted,
        currency: target,
        original_amount: amount,
        original_currency: source,
    })
}

/// Converts a transaction-shaped JSON object.
///
/// Every key of `record` is kept; `amount` is replaced by the converted value
/// and `currency`, `originalAmount` and `originalCurrency` are set.
pub fn convert_record(
    from: &str,
    to: &str,
    record: &Map<String, Value>,
) -> ResultEngine<Map<String, Value>> {
    let original = record
        .get("amount")
        .filter(|value| value.is_number())
        .cloned()
        .ok_or_else(|| EngineError::InvalidInput("amount must be a number".to_string()))?;
    let amount = original
        .as_f64()
        .ok_or_else(|| EngineError::InvalidInput("amount must be a number".to_string()))?;

    let conversion = convert_amount(from, to, amount)?;

    let mut converted = record.clone();
    converted.insert("amount".to_string(), Value::from(conversion.amount));
    converted.insert(
        "currency".to_string(),
        Value::from(conversion.currency.code()),
    );
    converted.insert("originalAmount".to_string(), original);
    converted.insert(
        "originalCurrency".to_string(),
        Value::from(conversion.original_currency.code()),
    );
    Ok(converted)
}
