//! Transactions API endpoints

use api_types::{
    DataResponse,
    transaction::{
        TransactionDeleted, TransactionKind as ApiKind, TransactionNew, TransactionUpdate,
        TransactionView,
    },
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::TransactionDraft;

use crate::{ServerError, json_body, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        title: tx.title,
        description: tx.description,
        amount: tx.amount,
        kind: map_kind(tx.kind),
        category: tx.category,
        created_at: tx.created_at,
    }
}

fn draft_from_new(payload: TransactionNew) -> TransactionDraft {
    TransactionDraft {
        title: payload.title,
        description: payload.description,
        amount: payload.amount,
        kind: payload.kind,
        category: payload.category,
    }
}

fn draft_from_update(payload: TransactionUpdate) -> TransactionDraft {
    TransactionDraft {
        title: payload.title,
        description: payload.description,
        amount: payload.amount,
        kind: payload.kind,
        category: payload.category,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<TransactionView>>), ServerError> {
    let draft = draft_from_new(json_body(payload)?);
    let tx = state.engine.create_transaction(&draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(
            "Task created successfully",
            map_transaction(tx),
        )),
    ))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<DataResponse<Vec<TransactionView>>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions()
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();

    Ok(Json(DataResponse::new(
        "Tasks retrieved successfully",
        transactions,
    )))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<DataResponse<TransactionView>>, ServerError> {
    let draft = draft_from_update(json_body(payload)?);
    let tx = state.engine.update_transaction(&id, &draft).await?;

    Ok(Json(DataResponse::new(
        "Task updated successfully",
        map_transaction(tx),
    )))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionDeleted>, ServerError> {
    let deleted_id = state.engine.delete_transaction(&id).await?;

    Ok(Json(TransactionDeleted {
        success: true,
        message: "Task deleted successfully".to_string(),
        deleted_id,
    }))
}
