//! Wire types of the Pocketbook HTTP API.
//!
//! Keys are camelCase to match what the web frontend sends and expects.

use serde::{Deserialize, Serialize};

/// Success body carrying a payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body carrying only a human readable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub mod transaction {
    use chrono::{DateTime, Utc};
    use serde_json::Value;
    use uuid::Uuid;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Request body for creating a transaction.
    ///
    /// Fields are raw JSON so that a missing or wrongly typed field is
    /// reported with its validation message instead of a generic parse error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub title: Option<Value>,
        pub description: Option<Value>,
        pub amount: Option<Value>,
        /// `income` or `expense`.
        #[serde(rename = "type")]
        pub kind: Option<Value>,
        pub category: Option<Value>,
    }

    /// Request body for a partial update. Absent or `null` fields are left
    /// unchanged.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub title: Option<Value>,
        pub description: Option<Value>,
        pub amount: Option<Value>,
        #[serde(rename = "type")]
        pub kind: Option<Value>,
        /// An empty string clears the category.
        pub category: Option<Value>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        pub title: String,
        pub description: String,
        /// Signed: expenses are negative.
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionDeleted {
        pub success: bool,
        pub message: String,
        pub deleted_id: Uuid,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryView {
        pub total_income: f64,
        /// Non-negative magnitude of all expenses.
        pub total_expense: f64,
        pub balance: f64,
    }
}

pub mod currency {
    use serde_json::{Map, Value};

    use super::*;

    /// Request body for `POST /api/currency/convert`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CurrencyConvert {
        pub from: Option<String>,
        pub to: Option<String>,
        /// Transaction-shaped object; only `amount` is required.
        pub task_data: Option<Map<String, Value>>,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        #[serde(default)]
        pub email: String,
        #[serde(default)]
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginToken {
        pub token: String,
    }
}
