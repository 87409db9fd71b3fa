//! Totals over a list of transaction-like records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EngineError, ResultEngine, TransactionKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    /// Always a non-negative magnitude.
    pub total_expense: f64,
    pub balance: f64,
}

impl Summary {
    fn record(&mut self, kind: TransactionKind, amount: f64) {
        match kind {
            TransactionKind::Income => self.total_income += amount,
            // Stored expenses are negative; older clients send them positive.
            TransactionKind::Expense => self.total_expense += amount.abs(),
        }
        self.balance = self.total_income - self.total_expense;
    }
}

/// Extracts `(type, amount)` from a record, or `None` if it is malformed.
fn entry(record: &Value) -> Option<(TransactionKind, f64)> {
    let object = record.as_object()?;
    let amount = object.get("amount")?.as_f64()?;
    let kind = TransactionKind::try_from(object.get("type")?.as_str()?).ok()?;
    Some((kind, amount))
}

/// Summarizes an arbitrary JSON value that must be an array of records.
///
/// Records without a numeric `amount` or a known `type` are skipped.
pub fn summarize(transactions: &Value) -> ResultEngine<Summary> {
    let records = transactions
        .as_array()
        .ok_or_else(|| EngineError::InvalidInput("transactions must be an array".to_string()))?;

    let mut summary = Summary::default();
    for (kind, amount) in records.iter().filter_map(entry) {
        summary.record(kind, amount);
    }
    if !(summary.total_income.is_finite() && summary.total_expense.is_finite()) {
        return Err(EngineError::InvalidInput(
            "transaction totals are out of range".to_string(),
        ));
    }

    tracing::debug!(
        records = records.len(),
        balance = summary.balance,
        "summarized transactions"
    );
    Ok(summary)
}
