//! Business rules a transaction payload must satisfy before it reaches a
//! store.
//!
//! Rules are checked in a fixed order and the first failure wins, so a payload
//! breaking several rules always reports the same reason.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::transactions::{
    NewTransaction, Transaction, TransactionKind, TransactionPatch, normalize_category,
};

/// A transaction payload as received, before any rule has been checked.
///
/// Fields hold raw JSON so that a value of the wrong type is reported by the
/// rule that owns the field, not by the body parser. `null` counts as absent.
///
/// Used both for creation (every field expected) and for partial updates
/// (only present fields are applied).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub amount: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    /// Anything but a string is ignored.
    pub category: Option<Value>,
}

/// Reason a payload was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required.")]
    TitleRequired,
    #[error("Description cannot be empty.")]
    DescriptionEmpty,
    #[error("Type must be either income or expense.")]
    InvalidType,
    #[error("Income amount cannot be negative.")]
    NegativeIncome,
    #[error("Expense amount cannot be positive.")]
    PositiveExpense,
    #[error("Amount is required.")]
    AmountRequired,
    #[error("Amount must be a number.")]
    AmountNotNumber,
}

fn check_title(title: Option<&Value>) -> Result<String, ValidationError> {
    match title {
        Some(Value::String(title)) if !title.is_empty() => Ok(title.clone()),
        _ => Err(ValidationError::TitleRequired),
    }
}

fn check_description(description: Option<&Value>) -> Result<String, ValidationError> {
    match description {
        Some(Value::String(description)) if !description.trim().is_empty() => {
            Ok(description.clone())
        }
        _ => Err(ValidationError::DescriptionEmpty),
    }
}

fn check_kind(kind: Option<&Value>) -> Result<TransactionKind, ValidationError> {
    kind.and_then(Value::as_str)
        .ok_or(ValidationError::InvalidType)
        .and_then(TransactionKind::try_from)
}

/// `Ok(None)` when absent, an error when present but not a finite number.
fn read_amount(amount: Option<&Value>) -> Result<Option<f64>, ValidationError> {
    match amount {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .filter(|amount| amount.is_finite())
            .map(Some)
            .ok_or(ValidationError::AmountNotNumber),
    }
}

fn read_category(category: Option<&Value>) -> Option<&str> {
    category.and_then(Value::as_str)
}

/// Zero is accepted for both kinds.
fn check_sign(kind: TransactionKind, amount: f64) -> Result<(), ValidationError> {
    match kind {
        TransactionKind::Income if amount < 0.0 => Err(ValidationError::NegativeIncome),
        TransactionKind::Expense if amount > 0.0 => Err(ValidationError::PositiveExpense),
        _ => Ok(()),
    }
}

/// Validates a creation payload.
pub fn validate_new(draft: &TransactionDraft) -> Result<NewTransaction, ValidationError> {
    let title = check_title(draft.title.as_ref())?;
    let description = check_description(draft.description.as_ref())?;
    let kind = check_kind(draft.kind.as_ref())?;
    // A malformed amount cannot break the sign rules, it is reported after them.
    let amount = read_amount(draft.amount.as_ref());
    if let Ok(Some(amount)) = amount {
        check_sign(kind, amount)?;
    }
    let amount = amount?.ok_or(ValidationError::AmountRequired)?;

    Ok(NewTransaction {
        title,
        description,
        amount,
        kind,
        category: normalize_category(read_category(draft.category.as_ref())),
    })
}

/// Validates a partial update against the record it will be applied to.
///
/// Title, description and type are only checked when present. The sign rule is
/// checked on the merged record, so a patch that only changes `amount` is
/// judged against the stored type.
pub fn validate_patch(
    existing: &Transaction,
    draft: &TransactionDraft,
) -> Result<TransactionPatch, ValidationError> {
    let title = draft
        .title
        .as_ref()
        .map(|title| check_title(Some(title)))
        .transpose()?;
    let description = draft
        .description
        .as_ref()
        .map(|description| check_description(Some(description)))
        .transpose()?;
    let kind = draft
        .kind
        .as_ref()
        .map(|kind| check_kind(Some(kind)))
        .transpose()?;
    let amount = read_amount(draft.amount.as_ref());
    if let Ok(merged) = amount {
        check_sign(
            kind.unwrap_or(existing.kind),
            merged.unwrap_or(existing.amount),
        )?;
    }
    let amount = amount?;

    Ok(TransactionPatch {
        title,
        description,
        amount,
        kind,
        category: read_category(draft.category.as_ref()).map(ToString::to_string),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft(kind: &str, amount: f64) -> TransactionDraft {
        TransactionDraft {
            title: Some(json!("Salary")),
            description: Some(json!("Monthly salary")),
            amount: Some(json!(amount)),
            kind: Some(json!(kind)),
            category: None,
        }
    }

    fn stored(kind: TransactionKind, amount: f64) -> Transaction {
        Transaction::new(NewTransaction {
            title: "Original".to_string(),
            description: "Original description".to_string(),
            amount,
            kind,
            category: None,
        })
    }

    #[test]
    fn valid_income_and_expense_are_accepted() {
        let income = validate_new(&draft("income", 5000.0)).unwrap();
        assert_eq!(income.kind, TransactionKind::Income);
        assert_eq!(income.amount, 5000.0);

        let expense = validate_new(&draft("expense", -150.0)).unwrap();
        assert_eq!(expense.kind, TransactionKind::Expense);
        assert_eq!(expense.amount, -150.0);
    }

    #[test]
    fn zero_is_valid_for_both_kinds() {
        assert!(validate_new(&draft("income", 0.0)).is_ok());
        assert!(validate_new(&draft("expense", 0.0)).is_ok());
    }

    #[test]
    fn missing_or_empty_title_is_rejected() {
        let mut payload = draft("income", 10.0);
        payload.title = None;
        assert_eq!(validate_new(&payload), Err(ValidationError::TitleRequired));

        payload.title = Some(json!(""));
        assert_eq!(validate_new(&payload), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut payload = draft("expense", -100.0);
        payload.description = Some(json!("   "));
        assert_eq!(
            validate_new(&payload),
            Err(ValidationError::DescriptionEmpty)
        );

        payload.description = None;
        assert_eq!(
            validate_new(&payload),
            Err(ValidationError::DescriptionEmpty)
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(
            validate_new(&draft("invalid_type", 100.0)),
            Err(ValidationError::InvalidType)
        );
        assert_eq!(
            validate_new(&draft("Income", 100.0)),
            Err(ValidationError::InvalidType)
        );
    }

    #[test]
    fn sign_must_match_type() {
        assert_eq!(
            validate_new(&draft("income", -1000.0)),
            Err(ValidationError::NegativeIncome)
        );
        assert_eq!(
            validate_new(&draft("expense", 1000.0)),
            Err(ValidationError::PositiveExpense)
        );
    }

    #[test]
    fn first_failing_rule_wins() {
        let payload = TransactionDraft {
            title: None,
            description: Some(json!("")),
            amount: Some(json!(-5.0)),
            kind: Some(json!("bogus")),
            category: None,
        };
        assert_eq!(validate_new(&payload), Err(ValidationError::TitleRequired));

        let payload = TransactionDraft {
            title: Some(json!("t")),
            ..payload
        };
        assert_eq!(
            validate_new(&payload),
            Err(ValidationError::DescriptionEmpty)
        );
    }

    #[test]
    fn wrongly_typed_fields_fail_their_own_rule() {
        let mut payload = draft("income", 10.0);
        payload.title = Some(json!(123));
        assert_eq!(validate_new(&payload), Err(ValidationError::TitleRequired));

        let mut payload = draft("income", 10.0);
        payload.description = Some(json!(["d"]));
        assert_eq!(
            validate_new(&payload),
            Err(ValidationError::DescriptionEmpty)
        );

        let mut payload = draft("income", 10.0);
        payload.kind = Some(json!(5));
        assert_eq!(validate_new(&payload), Err(ValidationError::InvalidType));
    }

    #[test]
    fn wrongly_typed_field_does_not_hide_an_earlier_rule() {
        let payload = TransactionDraft {
            title: None,
            description: Some(json!("d")),
            amount: Some(json!(5)),
            kind: Some(json!(["income"])),
            category: None,
        };
        assert_eq!(validate_new(&payload), Err(ValidationError::TitleRequired));

        let payload = TransactionDraft {
            amount: Some(json!("lots")),
            kind: Some(json!("bogus")),
            ..draft("income", 1.0)
        };
        assert_eq!(validate_new(&payload), Err(ValidationError::InvalidType));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let mut payload = draft("expense", -1.0);
        payload.amount = Some(json!("-1"));
        assert_eq!(
            validate_new(&payload),
            Err(ValidationError::AmountNotNumber)
        );

        let existing = stored(TransactionKind::Expense, -1.0);
        assert_eq!(
            validate_patch(
                &existing,
                &TransactionDraft {
                    amount: Some(json!(true)),
                    ..Default::default()
                },
            ),
            Err(ValidationError::AmountNotNumber)
        );
    }

    #[test]
    fn non_string_category_is_ignored() {
        let mut payload = draft("income", 1.0);
        payload.category = Some(json!(42));
        assert_eq!(validate_new(&payload).unwrap().category, None);
    }

    #[test]
    fn missing_amount_is_rejected_last() {
        let mut payload = draft("income", 1.0);
        payload.amount = None;
        assert_eq!(validate_new(&payload), Err(ValidationError::AmountRequired));
    }

    #[test]
    fn messages_match_the_api_contract() {
        assert_eq!(ValidationError::TitleRequired.to_string(), "Title is required.");
        assert_eq!(
            ValidationError::DescriptionEmpty.to_string(),
            "Description cannot be empty."
        );
        assert_eq!(
            ValidationError::InvalidType.to_string(),
            "Type must be either income or expense."
        );
        assert_eq!(
            ValidationError::NegativeIncome.to_string(),
            "Income amount cannot be negative."
        );
        assert_eq!(
            ValidationError::PositiveExpense.to_string(),
            "Expense amount cannot be positive."
        );
        assert_eq!(
            ValidationError::AmountRequired.to_string(),
            "Amount is required."
        );
    }

    #[test]
    fn patch_only_checks_present_text_fields() {
        let existing = stored(TransactionKind::Income, 1000.0);
        let patch = validate_patch(
            &existing,
            &TransactionDraft {
                amount: Some(json!(2000.0)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(patch.amount, Some(2000.0));
        assert_eq!(patch.title, None);

        let err = validate_patch(
            &existing,
            &TransactionDraft {
                description: Some(json!(" ")),
                ..Default::default()
            },
        );
        assert_eq!(err, Err(ValidationError::DescriptionEmpty));
    }

    #[test]
    fn patch_sign_is_checked_against_merged_record() {
        let income = stored(TransactionKind::Income, 1000.0);
        assert_eq!(
            validate_patch(
                &income,
                &TransactionDraft {
                    amount: Some(json!(-1000.0)),
                    kind: Some(json!("income")),
                    ..Default::default()
                },
            ),
            Err(ValidationError::NegativeIncome)
        );
        assert_eq!(
            validate_patch(
                &income,
                &TransactionDraft {
                    amount: Some(json!(-1.0)),
                    ..Default::default()
                },
            ),
            Err(ValidationError::NegativeIncome)
        );
        assert_eq!(
            validate_patch(
                &income,
                &TransactionDraft {
                    kind: Some(json!("expense")),
                    ..Default::default()
                },
            ),
            Err(ValidationError::PositiveExpense)
        );

        let flipped = validate_patch(
            &income,
            &TransactionDraft {
                kind: Some(json!("expense")),
                amount: Some(json!(-1000.0)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(flipped.kind, Some(TransactionKind::Expense));
    }

    #[test]
    fn patch_with_same_values_is_accepted() {
        let existing = stored(TransactionKind::Expense, -50.0);
        let patch = validate_patch(
            &existing,
            &TransactionDraft {
                amount: Some(json!(-50.0)),
                kind: Some(json!("expense")),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(patch.amount, Some(-50.0));
        assert_eq!(patch.kind, Some(TransactionKind::Expense));
    }
}
