//! Summary endpoint. Works on the request body only, never on stored data.

use api_types::{DataResponse, summary::SummaryView};
use axum::{Json, extract::rejection::JsonRejection};
use serde_json::Value;

use crate::{ServerError, json_body};

pub async fn sum(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataResponse<SummaryView>>, ServerError> {
    let transactions = json_body(payload)?;
    let summary = engine::summarize(&transactions)?;

    Ok(Json(DataResponse::new(
        "Transaction summary calculated successfully",
        SummaryView {
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            balance: summary.balance,
        },
    )))
}
