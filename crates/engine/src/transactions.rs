//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense record. Amounts are signed:
//! income is stored as a value `>= 0`, expense as a value `<= 0`.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, validation::ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ValidationError::InvalidType),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a stored record out of a validated payload, assigning the id and
    /// creation time.
    pub fn new(new: NewTransaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            amount: new.amount,
            kind: new.kind,
            category: new.category,
            created_at: Utc::now(),
        }
    }

    /// Overwrites the fields present in `patch`. `id` and `created_at` never
    /// change.
    pub fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = &patch.category {
            self.category = normalize_category(Some(category.as_str()));
        }
    }
}

/// A payload that passed [`validate_new`](crate::validate_new).
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Option<String>,
}

/// A partial update that passed [`validate_patch`](crate::validate_patch).
///
/// `None` leaves the stored field untouched. An empty `category` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

impl TransactionPatch {
    /// `true` when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
    }
}

pub(crate) fn normalize_category(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub category: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            title: ActiveValue::Set(tx.title.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            amount: ActiveValue::Set(tx.amount),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category: ActiveValue::Set(tx.category.clone()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            title: model.title,
            description: model.description,
            amount: model.amount,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            category: model.category,
            created_at: model.created_at,
        })
    }
}
