//! Currency conversion endpoint.

use api_types::{DataResponse, currency::CurrencyConvert};
use axum::{Json, extract::rejection::JsonRejection};
use serde_json::{Map, Value};

use crate::{ServerError, json_body};

fn missing_parameters() -> ServerError {
    ServerError::bad_request(
        "Missing currency conversion parameters (from, to, amount)",
        "Required fields missing",
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

pub async fn convert(
    payload: Result<Json<CurrencyConvert>, JsonRejection>,
) -> Result<Json<DataResponse<Map<String, Value>>>, ServerError> {
    let payload = json_body(payload)?;

    let (Some(from), Some(to), Some(task_data)) = (
        non_empty(payload.from),
        non_empty(payload.to),
        payload.task_data,
    ) else {
        return Err(missing_parameters());
    };
    if !task_data.get("amount").is_some_and(Value::is_number) {
        return Err(missing_parameters());
    }

    let converted = engine::convert_record(&from, &to, &task_data)?;

    Ok(Json(DataResponse::new(
        format!("Conversion successful from {from} to {to}"),
        converted,
    )))
}
